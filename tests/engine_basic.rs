#![forbid(unsafe_code)]
use chrono::{DateTime, TimeZone, Utc};
use permanence::{ActiveWindow, ConfigError, Engine, GridConfig, Role, SlotRef, Submission};

fn grid_config() -> GridConfig {
    GridConfig::weekdays(vec!["1".into(), "2".into(), "3".into(), "4".into()]).unwrap()
}

fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, day, hour, 0, 0).unwrap()
}

fn window() -> ActiveWindow {
    ActiveWindow::bounded(ts(1, 0), ts(6, 0)).unwrap()
}

fn submission(name: &str, role: Role, slots: &[(&str, &str)], at: DateTime<Utc>) -> Submission {
    Submission {
        name: name.to_string(),
        phone: format!("06-{name}"),
        role,
        availability: slots
            .iter()
            .map(|(day, period)| SlotRef::new(*day, *period))
            .collect(),
        timestamp: at,
        origin_id: None,
    }
}

#[test]
fn both_roles_share_a_cell() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![
        submission("alice", Role::Intern, &[("Tue", "3")], ts(1, 8)),
        submission("bob", Role::Senior, &[("Tue", "3")], ts(1, 9)),
    ];

    let outcome = engine.compute(&subs, &window());

    let cell = outcome.grid.cell_at(&SlotRef::new("Tue", "3")).unwrap();
    assert_eq!(cell.intern.as_ref().unwrap().name, "alice");
    assert_eq!(cell.senior.as_ref().unwrap().name, "bob");
    assert!(outcome.unplaced.is_empty());

    // intern avant senior dans l'ordre de rendu
    let names: Vec<&str> = cell.occupants().map(|(_, p)| p.name.as_str()).collect();
    assert_eq!(names, ["alice", "bob"]);
}

#[test]
fn contested_seat_goes_to_first_name() {
    let config = GridConfig::new(vec!["Mon".into()], vec!["1".into()]).unwrap();
    let engine = Engine::new(config).unwrap();
    let subs = vec![
        submission("B", Role::Intern, &[("Mon", "1")], ts(2, 0)),
        submission("A", Role::Intern, &[("Mon", "1")], ts(1, 8)),
    ];

    let outcome = engine.compute(&subs, &window());

    let cell = outcome.grid.cell(0, 0);
    assert_eq!(cell.intern.as_ref().unwrap().name, "A");
    assert_eq!(outcome.unplaced, vec!["B".to_string()]);
    assert_eq!(outcome.uncovered_cells(), 0);
}

#[test]
fn dedup_latest_timestamp_wins() {
    let engine = Engine::new(grid_config()).unwrap();
    // la plus récente arrive en premier dans l'entrée
    let subs = vec![
        submission("alice", Role::Intern, &[("Tue", "2")], ts(2, 10)),
        submission("alice", Role::Intern, &[("Mon", "1")], ts(1, 8)),
    ];

    let outcome = engine.compute(&subs, &window());

    assert!(outcome
        .grid
        .cell_at(&SlotRef::new("Mon", "1"))
        .unwrap()
        .is_empty());
    assert_eq!(
        outcome
            .grid
            .cell_at(&SlotRef::new("Tue", "2"))
            .unwrap()
            .intern
            .as_ref()
            .unwrap()
            .name,
        "alice"
    );
}

#[test]
fn dedup_equal_timestamps_keeps_first_seen() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![
        submission("alice", Role::Intern, &[("Mon", "1")], ts(1, 8)),
        submission("alice", Role::Intern, &[("Tue", "2")], ts(1, 8)),
    ];

    let outcome = engine.compute(&subs, &window());

    assert_eq!(
        outcome
            .grid
            .cell_at(&SlotRef::new("Mon", "1"))
            .unwrap()
            .intern
            .as_ref()
            .unwrap()
            .name,
        "alice"
    );
    assert!(outcome
        .grid
        .cell_at(&SlotRef::new("Tue", "2"))
        .unwrap()
        .is_empty());
}

#[test]
fn window_excludes_submission_before_start() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![submission(
        "alice",
        Role::Intern,
        &[("Mon", "1")],
        Utc.with_ymd_and_hms(2025, 9, 20, 8, 0, 0).unwrap(),
    )];

    let outcome = engine.compute(&subs, &window());

    // hors fenêtre : ni placée, ni signalée non-placée
    assert_eq!(outcome.uncovered_cells(), 20);
    assert!(outcome.unplaced.is_empty());
}

#[test]
fn window_upper_bound_is_exclusive() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![submission("alice", Role::Intern, &[("Mon", "1")], ts(6, 0))];

    let outcome = engine.compute(&subs, &window());

    assert_eq!(outcome.grid.occupant_count(), 0);
    assert!(outcome.unplaced.is_empty());
}

#[test]
fn open_ended_window_keeps_everything_since_start() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![submission(
        "alice",
        Role::Intern,
        &[("Mon", "1")],
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
    )];

    let outcome = engine.compute(&subs, &ActiveWindow::since(ts(1, 0)));

    assert_eq!(outcome.grid.occupant_count(), 1);
}

#[test]
fn out_of_grid_slot_is_silently_filtered() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![submission("alice", Role::Intern, &[("Sat", "1")], ts(1, 8))];

    let outcome = engine.compute(&subs, &window());

    assert_eq!(outcome.unplaced, vec!["alice".to_string()]);
    assert!(outcome.decode_failures.is_empty());
    assert_eq!(outcome.uncovered_cells(), 20);
}

#[test]
fn empty_availability_is_unplaced() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![submission("alice", Role::Intern, &[], ts(1, 8))];

    let outcome = engine.compute(&subs, &window());

    assert_eq!(outcome.unplaced, vec!["alice".to_string()]);
}

#[test]
fn duplicate_slots_never_double_book() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![submission(
        "alice",
        Role::Intern,
        &[("Mon", "1"), ("Mon", "1"), ("Tue", "2")],
        ts(1, 8),
    )];

    let outcome = engine.compute(&subs, &window());

    let placements = outcome
        .grid
        .iter()
        .flat_map(|(_, _, cell)| cell.occupants())
        .filter(|(_, p)| p.name == "alice")
        .count();
    assert_eq!(placements, 1);
}

#[test]
fn open_seat_is_preferred_over_contested_one() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![
        submission("alice", Role::Intern, &[("Mon", "1")], ts(1, 8)),
        submission("bob", Role::Intern, &[("Mon", "1"), ("Tue", "1")], ts(1, 9)),
    ];

    let outcome = engine.compute(&subs, &window());

    assert_eq!(
        outcome
            .grid
            .cell_at(&SlotRef::new("Mon", "1"))
            .unwrap()
            .intern
            .as_ref()
            .unwrap()
            .name,
        "alice"
    );
    assert_eq!(
        outcome
            .grid
            .cell_at(&SlotRef::new("Tue", "1"))
            .unwrap()
            .intern
            .as_ref()
            .unwrap()
            .name,
        "bob"
    );
    assert!(outcome.unplaced.is_empty());
}

#[test]
fn invariants_hold_on_mixed_pool() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![
        submission("alice", Role::Intern, &[("Mon", "1"), ("Mon", "2")], ts(1, 8)),
        submission("bob", Role::Intern, &[("Mon", "1"), ("Wed", "3")], ts(1, 9)),
        submission("carol", Role::Senior, &[("Mon", "1")], ts(2, 8)),
        submission("dave", Role::Senior, &[("Mon", "1")], ts(2, 9)),
        submission("erin", Role::Intern, &[("Sun", "9")], ts(3, 8)),
    ];

    let outcome = engine.compute(&subs, &window());

    // pas de double réservation
    let mut seen = std::collections::BTreeSet::new();
    for (_, _, cell) in outcome.grid.iter() {
        for (_, person) in cell.occupants() {
            assert!(seen.insert(person.name.clone()), "{} booked twice", person.name);
        }
    }

    // chaque placement appartient à la disponibilité soumise
    for (day, period, cell) in outcome.grid.iter() {
        for (role, person) in cell.occupants() {
            let sub = subs
                .iter()
                .find(|s| s.name == person.name)
                .expect("placed person has a submission");
            assert_eq!(sub.role, role);
            assert!(sub
                .availability
                .contains(&SlotRef::new(day, period)));
        }
    }

    // dave perd le siège senior de Mon:1 face à carol (nom premier)
    assert_eq!(outcome.unplaced, vec!["dave".to_string(), "erin".to_string()]);
}

#[test]
fn identical_input_yields_identical_outcome() {
    let engine = Engine::new(grid_config()).unwrap();
    let subs = vec![
        submission("alice", Role::Intern, &[("Mon", "1"), ("Tue", "2")], ts(1, 8)),
        submission("bob", Role::Intern, &[("Mon", "1")], ts(1, 9)),
        submission("carol", Role::Senior, &[("Mon", "1")], ts(2, 8)),
    ];

    let first = engine.compute(&subs, &window());
    let second = engine.compute(&subs, &window());

    assert_eq!(first, second);
}

#[test]
fn empty_grid_shape_is_fatal() {
    assert_eq!(
        GridConfig::new(vec![], vec!["1".into()]).unwrap_err(),
        ConfigError::NoDays
    );
    assert_eq!(
        GridConfig::new(vec!["Mon".into()], vec![]).unwrap_err(),
        ConfigError::NoPeriods
    );

    // une config bricolée à la main est revalidée par le moteur
    let broken = GridConfig {
        days: vec!["Mon".into(), "Mon".into()],
        periods: vec!["1".into()],
    };
    assert!(Engine::new(broken).is_err());
}

#[test]
fn degenerate_window_is_rejected() {
    let err = ActiveWindow::bounded(ts(1, 0), ts(1, 0)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidWindow);
}
