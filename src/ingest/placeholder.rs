// src/ingest/placeholder.rs
//! Terminal fallback: a fixed set of synthetic articles.
//!
//! Content is identical on every call; only the timestamps move, computed as
//! "N minutes before `now`".

use chrono::{DateTime, Duration, Utc};

use crate::classify::{estimate_read_time, Category, Priority};
use crate::ingest::types::Article;

pub const PLACEHOLDER_SOURCE: &str = "Civic Desk";

struct Seed {
    headline: &'static str,
    summary: &'static str,
    category: Category,
    priority: Priority,
    minutes_ago: i64,
}

const SEEDS: &[Seed] = &[
    Seed {
        headline: "Emergency helpline numbers for your area",
        summary: "Keep fire, ambulance and disaster-response numbers handy. Dial 112 for any emergency that needs police, fire or medical help.",
        category: Category::Emergency,
        priority: Priority::Urgent,
        minutes_ago: 5,
    },
    Seed {
        headline: "Monsoon preparedness: what residents should check",
        summary: "Clear drains near your home, secure loose objects on rooftops and note the nearest relief shelter before heavy rain arrives.",
        category: Category::Emergency,
        priority: Priority::High,
        minutes_ago: 18,
    },
    Seed {
        headline: "Free health check-up camps this week",
        summary: "Community health centres are running free screening for blood pressure, diabetes and eyesight. Carry an identity document.",
        category: Category::Health,
        priority: Priority::Medium,
        minutes_ago: 32,
    },
    Seed {
        headline: "School admission window opens for the new session",
        summary: "Government schools are accepting applications online and at the school office. Check the district portal for the document list.",
        category: Category::Education,
        priority: Priority::Medium,
        minutes_ago: 47,
    },
    Seed {
        headline: "Planned water supply maintenance in several wards",
        summary: "Supply may be interrupted for a few hours during pipeline maintenance. Store water in advance and report leaks to the utility.",
        category: Category::Infrastructure,
        priority: Priority::High,
        minutes_ago: 63,
    },
    Seed {
        headline: "How to report a pothole or broken streetlight",
        summary: "Use the civic reporting app to attach a photo and location. Reports are routed to the responsible department automatically.",
        category: Category::Infrastructure,
        priority: Priority::Medium,
        minutes_ago: 80,
    },
    Seed {
        headline: "Public transport timings updated for the festive season",
        summary: "Buses and metro services run extended hours on peak days. Check the transit operator's site before you travel.",
        category: Category::Transport,
        priority: Priority::Medium,
        minutes_ago: 95,
    },
    Seed {
        headline: "Air quality tips for high-pollution days",
        summary: "Limit outdoor exercise when the AQI is poor, keep windows closed during peak traffic hours and use a well-fitted mask outdoors.",
        category: Category::Environment,
        priority: Priority::Medium,
        minutes_ago: 120,
    },
    Seed {
        headline: "Neighbourhood safety: staying alert after dark",
        summary: "Walk on well-lit routes, share your trip with someone you trust and report non-working streetlights so they are fixed quickly.",
        category: Category::Safety,
        priority: Priority::High,
        minutes_ago: 150,
    },
    Seed {
        headline: "Ward committee meetings open to residents",
        summary: "Municipal ward committees meet monthly. Residents can attend, raise local issues and follow up on earlier complaints.",
        category: Category::Governance,
        priority: Priority::Low,
        minutes_ago: 185,
    },
    Seed {
        headline: "Volunteer drive for lake clean-up this weekend",
        summary: "Local groups are organising a clean-up. Gloves and bags are provided; register at the community centre to join.",
        category: Category::Community,
        priority: Priority::Low,
        minutes_ago: 220,
    },
    Seed {
        headline: "Track the status of your civic complaints",
        summary: "Every complaint gets a reference number. Use it to check progress, add details or vote on issues raised by your neighbours.",
        category: Category::CivicServices,
        priority: Priority::Low,
        minutes_ago: 260,
    },
];

/// Build the placeholder set relative to `now`. Never empty.
pub fn placeholder_articles(now: DateTime<Utc>) -> Vec<Article> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, s)| Article {
            id: format!("placeholder-{}", i + 1),
            headline: s.headline.to_string(),
            summary: s.summary.to_string(),
            image_url: None,
            source: PLACEHOLDER_SOURCE.to_string(),
            category: s.category,
            published_at: now - Duration::minutes(s.minutes_ago),
            read_time_minutes: estimate_read_time(&format!("{} {}", s.headline, s.summary)),
            priority: s.priority,
            origin_url: None,
            is_synthetic: true,
        })
        .collect()
}
