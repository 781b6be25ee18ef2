//! Seed data written by `tanktrack init`
//!
//! A fixed set of tanks across the four levels, one or more per category,
//! each seeded from its resolved stage list.

use crate::domain::{advance, applicable_stages, resolve, Classifier, TankDescriptor};
use crate::schemas::{Level, Site, Stage, StageTrack, SubTank, Tank};

/// Build an ungrouped tank with its first applicable stage in progress
fn tank(classifier: &Classifier, id: &str, name: &str, kind: &str, location: &str) -> Tank {
    let shell = Tank::new(id, name, kind, location, StageTrack::default());
    let stages = resolve(classifier, &TankDescriptor::for_tank(&shell));
    Tank {
        track: StageTrack::seeded(&stages),
        ..shell
    }
}

/// Build a grouped tank with `count` sub-tanks named `<id>-TANK-NN`
fn grouped(
    classifier: &Classifier,
    id: &str,
    name: &str,
    kind: &str,
    location: &str,
    count: usize,
) -> Tank {
    let shell = Tank::new(id, name, kind, location, StageTrack::default());
    let sub_tanks = (1..=count)
        .map(|i| {
            let blank = SubTank::new(
                format!("{}-TANK-{:02}", id, i),
                format!("{} {}", name, i),
                StageTrack::default(),
            );
            let stages = resolve(classifier, &TankDescriptor::for_sub_tank(&shell, &blank));
            SubTank {
                track: StageTrack::seeded(&stages),
                ..blank
            }
        })
        .collect();
    shell.with_sub_tanks(sub_tanks)
}

/// Complete every stage before `upto`, leaving `upto` in progress
fn progressed(classifier: &Classifier, mut tank: Tank, upto: Stage) -> Tank {
    let profile = classifier.classify(&TankDescriptor::for_tank(&tank));
    let stages = applicable_stages(&profile);
    let mut track = tank.track;
    for &stage in stages.iter().take_while(|&&s| s != upto) {
        track = advance(&track, &profile, stage).unwrap_or(track);
    }
    tank.track = track;
    tank
}

/// The seed site
pub fn seed_site(classifier: &Classifier) -> Site {
    let mut site = Site::default();

    site.insert(
        Level::N00,
        tank(classifier, "N00-PP-01", "Sewage pump pit", "Pump pit", "Core A")
            .with_coordinates(12.5, 40.0),
    );
    site.insert(
        Level::N00,
        tank(classifier, "N00-T-001", "Fire water reserve", "Fire water", "Core A")
            .with_coordinates(18.0, 42.5),
    );
    site.insert(
        Level::N00,
        tank(classifier, "EB1-Exterior-FW-01", "Exterior fire water", "Fire water", "North yard"),
    );
    site.insert(
        Level::N00,
        tank(
            classifier,
            "N00-RW-01",
            "Rain water valve chamber",
            "Rain water valve chamber",
            "East ramp",
        ),
    );

    site.insert(
        Level::N10,
        grouped(classifier, "EB16-STE-089", "Retention tank", "Retention", "Core B", 3)
            .with_coordinates(64.0, 18.5),
    );
    site.insert(
        Level::N10,
        tank(classifier, "N10-T-010", "Grey water tank", "Grey water", "Core B"),
    );
    site.insert(
        Level::N10,
        tank(
            classifier,
            "EB1-Interior-SW-02",
            "Interior sanitary water",
            "Sanitary water",
            "Core C",
        ),
    );

    site.insert(
        Level::N20,
        tank(classifier, "DEP-N20-01", "Deposit tank", "Deposit", "West wing"),
    );
    site.insert(
        Level::N20,
        tank(classifier, "N20-CR-01", "Chiller room sump", "Chiller room", "Plant room"),
    );
    let inspected = tank(
        classifier,
        "N20-T-020",
        "Cooling water tank",
        "Cooling water",
        "Plant room",
    );
    site.insert(Level::N20, progressed(classifier, inspected, Stage::InspectionStage1));

    site.insert(
        Level::N30,
        tank(classifier, "N30-PP-01", "Roof drainage pump pit", "Pump pit", "Roof core"),
    );
    site.insert(
        Level::N30,
        tank(classifier, "N30-T-030", "Sprinkler break tank", "Sprinkler", "Roof core"),
    );

    site
}
