use iced::font::{Style, Weight};
use iced::widget::{button, column, container, image, row, text, Column};
use iced::{Alignment, Element, Font, Length};

use super::theme;
use crate::state::form::{Outcome, UploadForm};
use crate::Message;

const PROCESSING_NOTICE: &str =
    "Your invoice is being processed by our AI, your download will start soon";
const PREVIEW_WIDTH: f32 = 384.0;

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};
const ITALIC: Font = Font {
    style: Style::Italic,
    ..Font::DEFAULT
};

/// Label and press state of the submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    /// Disabled only while busy; an empty selection is still submitted
    pub enabled: bool,
}

pub fn submit_control(form: &UploadForm) -> SubmitControl {
    if form.is_submitting() {
        SubmitControl {
            label: "Processing",
            enabled: false,
        }
    } else {
        SubmitControl {
            label: "Submit",
            enabled: true,
        }
    }
}

pub fn processing_notice(form: &UploadForm) -> Option<&'static str> {
    form.is_submitting().then_some(PROCESSING_NOTICE)
}

/// The whole upload page: header, form panel, preview
pub fn view<'a>(form: &'a UploadForm, status: &'a str) -> Element<'a, Message> {
    let header = column![
        text("Extractify").size(30).font(BOLD),
        text("Invoice data extractor").font(ITALIC),
    ];

    let submit = submit_control(form);
    let controls = row![
        button("Choose image")
            .on_press(Message::ChooseImage)
            .padding([8, 16]),
        button(submit.label)
            .on_press_maybe(submit.enabled.then_some(Message::Submit))
            .padding([8, 16]),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let mut panel: Column<Message> = column![
        text("Upload your invoice picture here!").size(18).font(BOLD),
        container(controls).center_x(Length::Fill),
    ]
    .spacing(8);

    if let Some(notice) = processing_notice(form) {
        panel = panel.push(text(notice));
    }

    let panel = container(panel.padding([8, 4]))
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(theme::PRIMARY.into()),
            ..container::Style::default()
        });

    let mut content = column![header, panel].spacing(8).padding(8);

    if let Some(line) = outcome_line(form.outcome()) {
        content = content.push(line);
    }
    if !status.is_empty() {
        content = content.push(text(status).size(14));
    }

    if let Some(selected) = form.selected_image() {
        let preview = column![
            text("Your uploaded image:").size(18),
            image(selected.preview.clone()).width(Length::Fixed(PREVIEW_WIDTH)),
        ]
        .spacing(4)
        .padding([16, 0]);

        content = content.push(
            container(preview)
                .center_x(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(theme::PREVIEW_BACKGROUND.into()),
                    ..container::Style::default()
                }),
        );
    }

    content.into()
}

fn outcome_line<'a>(outcome: Option<&'a Outcome>) -> Option<Element<'a, Message>> {
    match outcome? {
        Outcome::Delivered(path) => Some(text(format!("Saved {}", path.display())).into()),
        Outcome::Failed(_) => Some(
            text("Processing failed, no CSV was downloaded.")
                .color(theme::ACCENT)
                .into(),
        ),
    }
}
