use std::cmp::Ordering;
use std::collections::HashSet;

use jb_common::corrections::{salary::parse_salary, tools::available_tools, DerivedSignals};
use jb_common::matching::ranking::{compare_keys, relevance_score, SortKey};
use jb_common::matching::{
    BoardEngine, FilterState, RelevanceBonuses, SortMode, TimezoneFilter,
};
use jb_common::Listing;

fn listing(id: &str) -> Listing {
    Listing {
        id: id.into(),
        ..Listing::default()
    }
}

fn ids(listings: &[Listing], filter: &FilterState) -> Vec<String> {
    BoardEngine::default()
        .compute(listings, filter, &HashSet::new())
        .ids()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn salary_parsing_examples() {
    let range = parse_salary("$45/hr");
    assert_eq!((range.min, range.max), (93_600, 93_600));

    let range = parse_salary("$100k - $140k");
    assert_eq!((range.min, range.max), (100_000, 140_000));

    let range = parse_salary("Competitive");
    assert_eq!((range.min, range.max), (0, 0));
}

#[test]
fn plan_weight_beats_salary_sort() {
    let listings = vec![
        Listing {
            plan_type: Some("Standard".into()),
            salary: "$60k".into(),
            timestamp: Some(100),
            ..listing("a")
        },
        Listing {
            plan_type: Some("Elite Managed".into()),
            salary: "$50k".into(),
            timestamp: Some(1),
            ..listing("b")
        },
    ];
    let filter = FilterState {
        sort_by: SortMode::Salary,
        ..FilterState::default()
    };

    assert_eq!(ids(&listings, &filter), vec!["b", "a"]);
}

#[test]
fn plan_weight_beats_recency() {
    let listings = vec![
        Listing {
            plan_type: Some("Standard".into()),
            timestamp: Some(1_000_000),
            ..listing("standard")
        },
        Listing {
            plan_type: Some("Elite".into()),
            timestamp: Some(1),
            ..listing("elite")
        },
        Listing {
            plan_type: Some("Featured".into()),
            timestamp: Some(500),
            ..listing("featured")
        },
    ];

    assert_eq!(
        ids(&listings, &FilterState::default()),
        vec!["elite", "featured", "standard"]
    );
}

#[test]
fn tool_filter_keeps_matching_tag() {
    let listings = vec![
        Listing {
            tags: vec!["notion".into()],
            ..listing("x")
        },
        Listing {
            tags: vec!["airtable".into()],
            ..listing("y")
        },
    ];
    let filter = FilterState {
        selected_tools: vec!["Notion".into()],
        ..FilterState::default()
    };

    assert_eq!(ids(&listings, &filter), vec!["x"]);
}

#[test]
fn make_alias_passes_tool_filter() {
    let listings = vec![Listing {
        tools: vec!["make.com".into()],
        ..listing("m")
    }];
    let filter = FilterState {
        selected_tools: vec!["Make".into()],
        ..FilterState::default()
    };

    assert_eq!(ids(&listings, &filter), vec!["m"]);
    assert_eq!(available_tools(&listings), vec!["Make"]);
}

#[test]
fn keyword_hits_outrank_higher_base_score() {
    let first = Listing {
        title: "Ops Manager".into(),
        match_score: Some(10.0),
        ..listing("first")
    };
    let second = Listing {
        title: "Engineer".into(),
        match_score: Some(15.0),
        ..listing("second")
    };
    let filter = FilterState {
        query: "ops".into(),
        sort_by: SortMode::Relevant,
        ..FilterState::default()
    };
    let bonuses = RelevanceBonuses::default();

    let first_score = relevance_score(&first, &DerivedSignals::derive(&first), &filter, &bonuses);
    let second_score =
        relevance_score(&second, &DerivedSignals::derive(&second), &filter, &bonuses);
    assert_eq!(first_score, 20.0);
    assert_eq!(second_score, 15.0);

    let first_key = SortKey::new(&first, &DerivedSignals::derive(&first), first_score);
    let second_key = SortKey::new(&second, &DerivedSignals::derive(&second), second_score);
    assert_eq!(
        compare_keys(&first_key, &second_key, SortMode::Relevant),
        Ordering::Less
    );
}

#[test]
fn relevance_sort_orders_by_composite_score() {
    let listings = vec![
        Listing {
            title: "Ops Engineer".into(),
            tools: vec!["Notion".into()],
            match_score: Some(15.0),
            ..listing("plain")
        },
        Listing {
            title: "Ops Automation Lead".into(),
            tools: vec!["Zapier".into(), "Notion".into()],
            match_score: Some(12.0),
            ..listing("tooled")
        },
    ];
    let filter = FilterState {
        query: "ops".into(),
        sort_by: SortMode::Relevant,
        ..FilterState::default()
    };
    // plain 15 + 10, tooled 12 + 10
    assert_eq!(ids(&listings, &filter), vec!["plain", "tooled"]);

    // plain 25 + 6, tooled 22 + 12
    let with_tools = FilterState {
        selected_tools: vec!["Zapier".into(), "Notion".into()],
        ..filter
    };
    assert_eq!(ids(&listings, &with_tools), vec!["tooled", "plain"]);
}

#[test]
fn unknown_timezone_listing_survives_eu_filter() {
    let listings = vec![
        Listing {
            location: "Anywhere".into(),
            remote_policy: "Remote".into(),
            description: "Build automations for our clients.".into(),
            ..listing("unknown")
        },
        Listing {
            location: "New York".into(),
            remote_policy: "Onsite".into(),
            ..listing("us")
        },
        Listing {
            location: "Lisbon".into(),
            remote_policy: "Remote".into(),
            timestamp: Some(5),
            ..listing("eu")
        },
    ];
    let filter = FilterState {
        timezone: TimezoneFilter::EuFriendly,
        ..FilterState::default()
    };

    assert_eq!(ids(&listings, &filter), vec!["eu", "unknown"]);
}

#[test]
fn unknown_timezone_gets_no_eu_relevance_bonus() {
    let unknown = Listing {
        location: "Anywhere".into(),
        remote_policy: "Remote".into(),
        match_score: Some(20.0),
        ..listing("unknown")
    };
    let eu = Listing {
        location: "Lisbon".into(),
        remote_policy: "Remote".into(),
        match_score: Some(20.0),
        ..listing("eu")
    };
    let filter = FilterState {
        timezone: TimezoneFilter::EuFriendly,
        sort_by: SortMode::Relevant,
        ..FilterState::default()
    };
    let bonuses = RelevanceBonuses::default();

    let unknown_signals = DerivedSignals::derive(&unknown);
    assert!(unknown_signals.timezone.known().is_none());

    let unknown_score = relevance_score(&unknown, &unknown_signals, &filter, &bonuses);
    let eu_score = relevance_score(&eu, &DerivedSignals::derive(&eu), &filter, &bonuses);
    assert_eq!(unknown_score, eu_score);
    assert_eq!(unknown_score, 20.0);
}

#[test]
fn recomputation_is_deterministic() {
    let listings: Vec<Listing> = (0..20)
        .map(|i| Listing {
            salary: format!("${}k", 50 + (i % 7) * 10),
            plan_type: Some(if i % 5 == 0 { "Pro" } else { "Standard" }.into()),
            timestamp: Some((i % 3) as i64),
            ..listing(&format!("l{i}"))
        })
        .collect();
    let filter = FilterState {
        sort_by: SortMode::Salary,
        ..FilterState::default()
    };

    assert_eq!(ids(&listings, &filter), ids(&listings, &filter));
}
