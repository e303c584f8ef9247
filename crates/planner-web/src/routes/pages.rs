//! Page templates and their view models.

use askama::Template;
use chrono::NaiveDate;
use planner::{HistoryView, UserSession};
use planner_core::{Interest, Pace, TripRequest};
use serde::Deserialize;

use crate::markdown;

/// Login form.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub notice: String,
    pub error: String,
}

/// Sign-up form.
#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignUpTemplate {
    pub error: String,
}

/// Planner page for a signed-in user.
#[derive(Template)]
#[template(path = "planner.html")]
pub struct PlannerTemplate {
    pub email: String,
    pub notice: String,
    pub error: String,
    pub warning: String,
    pub form: TripForm,
    /// Rendered result of the last request, empty when there is none.
    pub result_html: String,
    pub result_failed: bool,
    pub recent: Vec<RecentLine>,
    pub history: Vec<HistoryItem>,
    pub history_warning: String,
    pub history_limit: usize,
}

/// A checkbox or radio option.
pub struct Choice {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// Values shown in the itinerary form.
pub struct TripForm {
    pub origin: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub interests: Vec<Choice>,
    pub paces: Vec<Choice>,
}

impl TripForm {
    /// Defaults: Hanoi to Da Nang, starting and ending `today`, Food and
    /// Nature, normal pace.
    pub fn defaults(today: NaiveDate) -> Self {
        let today = today.format("%Y-%m-%d").to_string();
        Self::from_request(&TripRequest {
            origin: "Hanoi".to_string(),
            destination: "Da Nang, Vietnam".to_string(),
            start_date: today.clone(),
            end_date: today,
            interests: vec![Interest::Food, Interest::Nature],
            pace: Pace::Normal,
        })
    }

    /// Echo a submitted request back into the form.
    pub fn from_request(request: &TripRequest) -> Self {
        let interests = Interest::ALL
            .iter()
            .map(|interest| Choice {
                value: interest.label().to_ascii_lowercase(),
                label: interest.label().to_string(),
                checked: request.interests.contains(interest),
            })
            .collect();

        let paces = Pace::ALL
            .iter()
            .map(|pace| Choice {
                value: pace.as_str().to_string(),
                label: pace.as_str().to_string(),
                checked: *pace == request.pace,
            })
            .collect();

        Self {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            start_date: request.start_date.clone(),
            end_date: request.end_date.clone(),
            interests,
            paces,
        }
    }
}

/// Submitted itinerary form.
///
/// Each interest is its own checkbox; a present field means checked.
#[derive(Debug, Deserialize)]
pub struct ItineraryForm {
    pub origin: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default)]
    pub museums: Option<String>,
    #[serde(default)]
    pub nature: Option<String>,
    #[serde(default)]
    pub nightlife: Option<String>,
    #[serde(default)]
    pub pace: Pace,
}

impl ItineraryForm {
    pub fn into_request(self) -> TripRequest {
        let checked = [
            (Interest::Food, self.food.is_some()),
            (Interest::Museums, self.museums.is_some()),
            (Interest::Nature, self.nature.is_some()),
            (Interest::Nightlife, self.nightlife.is_some()),
        ];

        TripRequest {
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            interests: checked
                .into_iter()
                .filter_map(|(interest, on)| on.then_some(interest))
                .collect(),
            pace: self.pace,
        }
    }
}

/// A conversation line shown under "Recent conversation".
pub struct RecentLine {
    pub role: String,
    pub html: String,
}

/// One itinerary in the history list.
pub struct HistoryItem {
    pub created_label: String,
    pub html: String,
}

impl PlannerTemplate {
    pub fn new(user: &UserSession, form: TripForm, history: HistoryView, history_limit: usize) -> Self {
        let recent = user
            .recent
            .iter()
            .map(|message| RecentLine {
                role: message.role.to_string(),
                html: markdown::to_html(&message.content),
            })
            .collect();

        let history_items = history
            .entries
            .iter()
            .map(|entry| HistoryItem {
                created_label: entry.created_label.clone(),
                html: markdown::to_html(&entry.content),
            })
            .collect();

        Self {
            email: user.email.clone(),
            notice: String::new(),
            error: String::new(),
            warning: String::new(),
            form,
            result_html: String::new(),
            result_failed: false,
            recent,
            history: history_items,
            history_warning: history.warning.unwrap_or_default(),
            history_limit,
        }
    }
}
