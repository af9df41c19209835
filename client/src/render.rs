//! Display logic: status badges, funding progress and HTML fragments.
//!
//! Everything here is a pure function of its arguments; the current date is
//! always passed in.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Event, EventDetail};
use crate::search::ResultsView;
use crate::store::EventStats;

pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Future events at most this many days away are "Coming Soon".
pub const COMING_SOON_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Ended,
    Today,
    ComingSoon,
    Upcoming,
}

impl EventStatus {
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Ended => "Ended",
            EventStatus::Today => "Today",
            EventStatus::ComingSoon => "Coming Soon",
            EventStatus::Upcoming => "Upcoming",
        }
    }

    pub fn badge_style(self) -> &'static str {
        match self {
            EventStatus::Ended => "background: #7f8c8d; color: white;",
            EventStatus::Today => "background: #e74c3c; color: white;",
            EventStatus::ComingSoon => "background: #f39c12; color: white;",
            EventStatus::Upcoming => "background: #27ae60; color: white;",
        }
    }
}

pub fn derive_status(event_date: NaiveDate, today: NaiveDate) -> EventStatus {
    let days_ahead = (event_date - today).num_days();
    match days_ahead {
        d if d < 0 => EventStatus::Ended,
        0 => EventStatus::Today,
        d if d <= COMING_SOON_WINDOW_DAYS => EventStatus::ComingSoon,
        _ => EventStatus::Upcoming,
    }
}

/// Share of the goal raised so far, in `[0, 100]`. Zero when there is no goal.
pub fn progress_percentage(current: Decimal, goal: Decimal) -> f64 {
    if goal <= Decimal::ZERO {
        return 0.0;
    }
    // Overflow only happens far past the goal.
    let ratio = current
        .checked_div(goal)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|p| p.to_f64())
        .unwrap_or(100.0);
    ratio.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingBand {
    Achieved,
    NearlyThere,
    Halfway,
    JustStarted,
}

impl FundingBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            FundingBand::Achieved
        } else if percentage >= 75.0 {
            FundingBand::NearlyThere
        } else if percentage >= 50.0 {
            FundingBand::Halfway
        } else {
            FundingBand::JustStarted
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            FundingBand::Achieved => "#27ae60",
            FundingBand::NearlyThere => "#3498db",
            FundingBand::Halfway => "#f39c12",
            FundingBand::JustStarted => "#e74c3c",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FundingBand::Achieved => "Fundraising goal achieved!",
            FundingBand::NearlyThere => "Close to target, keep going!",
            FundingBand::Halfway => "Halfway there, thank you for your support!",
            FundingBand::JustStarted => "Just started, we need your help!",
        }
    }
}

/// "November 20, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn format_time(time: Option<NaiveTime>) -> String {
    match time {
        Some(time) => time.format("%H:%M").to_string(),
        None => "Time to be determined".to_string(),
    }
}

/// Thousands-grouped amount without trailing zeros, e.g. `12,500` or `99.5`.
pub fn format_amount(amount: Decimal) -> String {
    let text = amount.normalize().to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn price_label(event: &Event) -> String {
    if event.is_free {
        "Free Event".to_string()
    } else {
        format!("${}", event.ticket_price.round_dp(2))
    }
}

pub fn image_src(image_url: Option<&str>) -> &str {
    match image_url {
        Some(url) if !url.trim().is_empty() => url,
        _ => PLACEHOLDER_IMAGE,
    }
}

/// Email, phone and address joined for the organisation card.
pub fn organisation_contact(detail: &EventDetail) -> String {
    let parts: Vec<String> = [
        detail.contact_email.as_deref().map(|v| format!("Email: {v}")),
        detail.contact_phone.as_deref().map(|v| format!("Phone: {v}")),
        detail.address.as_deref().map(|v| format!("Address: {v}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        "Please contact the event organizer for more information".to_string()
    } else {
        parts.join(" | ")
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn status_badge(status: EventStatus) -> String {
    format!(
        r#"<span class="event-status" style="{} padding: 0.2rem 0.5rem; border-radius: 12px; font-size: 0.8rem;">{}</span>"#,
        status.badge_style(),
        status.label()
    )
}

fn image_tag(event: &Event, class: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" class="{class}" onerror="this.src='{PLACEHOLDER_IMAGE}'" loading="lazy">"#,
        escape_html(image_src(event.image_url.as_deref())),
        escape_html(&event.title),
    )
}

pub fn render_event_card(event: &Event, today: NaiveDate) -> String {
    let status = derive_status(event.event_date, today);
    format!(
        concat!(
            r#"<div class="event-card">"#,
            "{image}",
            r#"<div class="event-content">"#,
            r#"<div class="event-header"><h3 class="event-title">{title}</h3>{badge}</div>"#,
            r#"<div class="event-meta"><span>{date}</span><span>{location}</span></div>"#,
            r#"<div class="event-category">{category}</div>"#,
            r#"<p class="event-description">{description}</p>"#,
            r#"<div class="event-meta"><span>Goal: ${goal}</span><span>Raised: ${raised}</span></div>"#,
            r#"<a href="event-details.html?id={id}" class="event-details-link">View Details</a>"#,
            "</div></div>"
        ),
        image = image_tag(event, "event-image"),
        title = escape_html(&event.title),
        badge = status_badge(status),
        date = format_date(event.event_date),
        location = escape_html(&event.location),
        category = escape_html(event.category_name.as_deref().unwrap_or("")),
        description = escape_html(&event.description),
        goal = format_amount(event.fundraising_goal),
        raised = format_amount(event.current_amount),
        id = event.id,
    )
}

/// The results region: an inline error, a no-results notice, or the cards.
pub fn render_results(view: &ResultsView, today: NaiveDate) -> String {
    if let Some(error) = &view.error {
        return format!(r#"<div class="error-message">{}</div>"#, escape_html(error));
    }
    if view.events.is_empty() {
        return r#"<div class="no-results">No events match your search.</div>"#.to_string();
    }
    view.events
        .iter()
        .map(|event| render_event_card(event, today))
        .collect()
}

pub fn render_progress(current: Decimal, goal: Decimal) -> String {
    let percentage = progress_percentage(current, goal);
    let band = FundingBand::from_percentage(percentage);
    format!(
        concat!(
            r#"<div class="fundraising-section">"#,
            r#"<div class="amounts">${current} of ${goal}</div>"#,
            r#"<div class="progress-bar"><div class="progress-fill" style="width: {width}%; background: {color};"></div></div>"#,
            r#"<div class="progress-percentage">{percentage:.1}%</div>"#,
            r#"<div class="fundraising-status">{message}</div>"#,
            "</div>"
        ),
        current = format_amount(current),
        goal = format_amount(goal),
        width = percentage,
        color = band.color(),
        percentage = percentage,
        message = band.message(),
    )
}

pub fn render_event_detail(detail: &EventDetail, today: NaiveDate) -> String {
    let event = &detail.event;
    let status = derive_status(event.event_date, today);
    let description = event
        .full_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(&event.description);
    let venue = event
        .venue_details
        .as_deref()
        .map(|v| format!(r#"<p class="venue-details">Venue Details: {}</p>"#, escape_html(v)))
        .unwrap_or_default();

    let mut html = format!(
        concat!(
            r#"<article class="event-detail">"#,
            "{image}",
            r#"<h1 class="event-title">{title}</h1>{badge}"#,
            r#"<div class="event-category">{category}</div>"#,
            r#"<ul class="event-facts"><li>{date}</li><li>{time}</li><li>{location}</li><li>{organisation}</li><li class="price">{price}</li></ul>"#,
            "{progress}",
            r#"<p class="event-full-description">{description}</p>"#,
            "{venue}",
            "</article>"
        ),
        image = image_tag(event, "event-hero-image"),
        title = escape_html(&event.title),
        badge = status_badge(status),
        category = escape_html(event.category_name.as_deref().unwrap_or("")),
        date = format_date(event.event_date),
        time = format_time(event.event_time),
        location = escape_html(&event.location),
        organisation = escape_html(event.organisation_name.as_deref().unwrap_or("")),
        price = price_label(event),
        progress = render_progress(event.current_amount, event.fundraising_goal),
        description = escape_html(description),
        venue = venue,
    );

    if let Some(name) = event.organisation_name.as_deref() {
        html.push_str(&format!(
            concat!(
                r#"<section class="organization-card">"#,
                r#"<h2 class="org-name">{name}</h2>"#,
                r#"<p class="org-mission">{mission}</p>"#,
                r#"<p class="org-contact">{contact}</p>"#,
                r#"<p class="org-description">{about}</p>"#,
                "</section>"
            ),
            name = escape_html(name),
            mission = escape_html(
                detail
                    .mission_statement
                    .as_deref()
                    .unwrap_or("Committed to creating positive social impact")
            ),
            contact = escape_html(&organisation_contact(detail)),
            about = escape_html(
                detail
                    .organisation_description
                    .as_deref()
                    .unwrap_or("A charity organization dedicated to social welfare.")
            ),
        ));
    }

    html
}

/// `None` when there is nothing related, so the section can be hidden.
pub fn render_related_events(events: &[Event], today: NaiveDate) -> Option<String> {
    if events.is_empty() {
        return None;
    }
    Some(
        events
            .iter()
            .map(|event| {
                format!(
                    concat!(
                        r#"<a class="related-event-card" href="event-details.html?id={id}">"#,
                        "{image}",
                        r#"<h4 class="related-event-title">{title}</h4>"#,
                        r#"<div class="related-event-meta"><span>{date}</span><span>{location}</span></div>"#,
                        "{badge}",
                        "</a>"
                    ),
                    id = event.id,
                    image = image_tag(event, "related-event-image"),
                    title = escape_html(&event.title),
                    date = format_date(event.event_date),
                    location = escape_html(&event.location),
                    badge = status_badge(derive_status(event.event_date, today)),
                )
            })
            .collect(),
    )
}

pub fn render_stats_line(stats: &EventStats) -> String {
    format!(
        "Total Raised: ${} of ${}, Upcoming Events: {}",
        format_amount(stats.total_raised),
        format_amount(stats.total_goal),
        stats.upcoming_events
    )
}
