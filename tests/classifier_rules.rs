// tests/classifier_rules.rs
// Hand-picked headlines for the ordered keyword classifier.

use civic_newsfeed::classify::{classify, estimate_read_time, prioritize, Category, Priority};

#[test]
fn gas_leak_is_urgent_emergency() {
    let text = "Gas leak forces evacuation near hospital";
    assert_eq!(classify(text), Category::Emergency);
    assert_eq!(prioritize(text), Priority::Urgent);
}

#[test]
fn emergency_rule_precedes_education() {
    assert_eq!(classify("emergency school closure"), Category::Emergency);
    assert_eq!(classify("EMERGENCY School Closure"), Category::Emergency);
}

#[test]
fn representative_headlines() {
    let cases = [
        ("Dengue cases rise as clinics extend hours", Category::Health),
        ("University exam schedule released", Category::Education),
        ("Metro services extended on weekends", Category::Transport),
        ("New flyover bridge opens to traffic", Category::Transport),
        ("Sewage line repair on Ring Road", Category::Infrastructure),
        ("AQI worsens as smog blankets the capital", Category::Environment),
        ("Police arrest two in chain-snatching case", Category::Safety),
        ("Municipal budget allocates funds for parks", Category::Governance),
        ("Residents organise neighbourhood clean-up", Category::Community),
        ("Property tax portal adds online receipts", Category::CivicServices),
    ];
    for (text, want) in cases {
        assert_eq!(classify(text), want, "{text}");
    }
}

#[test]
fn priorities() {
    assert_eq!(prioritize("Breaking: flyover collapses"), Priority::Urgent);
    assert_eq!(prioritize("Power cut scheduled in sector 12"), Priority::High);
    assert_eq!(prioritize("Road closure announced for parade"), Priority::High);
    assert_eq!(prioritize("Food festival returns this weekend"), Priority::Low);
    assert_eq!(prioritize("Library adds evening hours"), Priority::Medium);
}

#[test]
fn classification_is_pure() {
    let text = "Water supply disrupted after pipeline burst";
    let first = (classify(text), prioritize(text));
    for _ in 0..10 {
        assert_eq!((classify(text), prioritize(text)), first);
    }
}

#[test]
fn unmatched_text_gets_defaults() {
    assert_eq!(classify(""), Category::CivicServices);
    assert_eq!(prioritize(""), Priority::Medium);
}

#[test]
fn read_time_estimates() {
    assert_eq!(estimate_read_time("one two three"), 1);
    assert_eq!(estimate_read_time(&"word ".repeat(400)), 2);
    assert_eq!(estimate_read_time(&"word ".repeat(401)), 3);
}
