use super::RenderCoordinator;
use crate::domain::weather::{is_tomorrow, is_yesterday, same_hour};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTimeLabel {
    pub title: String,
    pub detail: &'static str,
}

impl SelectedTimeLabel {
    fn live() -> Self {
        Self {
            title: "Current Time".to_string(),
            detail: "Live weather conditions",
        }
    }
}

pub(super) fn build(view: &RenderCoordinator<'_>) -> SelectedTimeLabel {
    let Some(time) = view.selected_conditions().time else {
        return SelectedTimeLabel::live();
    };
    let live = view.selection.is_live();
    if live && same_hour(time, view.now) {
        return SelectedTimeLabel::live();
    }

    let today = view.now.date();
    let clock = time.format("%I:%M %p");
    let (title, detail) = if time.date() == today {
        (format!("Today, {clock}"), "Today's weather conditions")
    } else if is_tomorrow(time.date(), today) {
        (format!("Tomorrow, {clock}"), "Tomorrow's weather forecast")
    } else if is_yesterday(time.date(), today) {
        (format!("Yesterday, {clock}"), "Yesterday's weather conditions")
    } else {
        let detail = if live {
            "Historical/forecast conditions"
        } else {
            "Forecast conditions"
        };
        (time.format("%a, %b %-d, %I:%M %p").to_string(), detail)
    };
    SelectedTimeLabel { title, detail }
}
