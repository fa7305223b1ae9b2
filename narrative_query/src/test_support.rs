//! Shared fixture for query tests.
//!
//! Two missions, three narratives (one with a faction key pointing at a
//! faction that no longer exists), two sub-narratives, four events (one a
//! sub-event), and the people, organizations, documents and sources that
//! tie them together.

use chrono::{NaiveDate, TimeZone, Utc};
use entity_store::{
    Coordinates, Document, EntityStore, Event, Faction, FactionOverlap, Location, Mission,
    Narrative, NarrativeStatus, Organization, Person, RecordId, SentimentLabel, Source,
    SourceCategory, SubNarrative, VolumePoint,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn ids<'a>(records: impl IntoIterator<Item = &'a RecordId>) -> Vec<&'a str> {
    records.into_iter().map(RecordId::as_str).collect()
}

pub fn fixture_store() -> EntityStore {
    let mut store = EntityStore::new();

    store.insert(Mission::new("m1", "Elections")).unwrap();
    store.insert(Mission::new("m2", "Public health")).unwrap();

    let mut reformists = Faction::new("f1", "Reformists").with_related_faction("f2");
    reformists.affiliated_person_ids.push(RecordId::from("p3"));
    store.insert(reformists).unwrap();
    store.insert(Faction::new("f2", "Loyalists")).unwrap();
    store.insert(Faction::new("f3", "Independents")).unwrap();
    store
        .insert(FactionOverlap::new(
            "o1",
            vec![RecordId::from("f1"), RecordId::from("f2")],
            40,
        ))
        .unwrap();

    store
        .insert(Location::new("l1", "Capital", Coordinates { lat: 10.0, lng: 20.0 }))
        .unwrap();
    store
        .insert(Location::new("l2", "Harbor", Coordinates { lat: 11.0, lng: 21.0 }))
        .unwrap();
    store
        .insert(Location::new("l3", "Border town", Coordinates { lat: 12.0, lng: 22.0 }))
        .unwrap();

    store
        .insert(
            Person::new("p1", "Ada Vance")
                .with_faction("f1")
                .with_location("l1")
                .with_event("e1"),
        )
        .unwrap();
    store.insert(Person::new("p2", "Ben Okafor").with_faction("f2")).unwrap();
    store.insert(Person::new("p3", "Cleo Marsh")).unwrap();

    store
        .insert(
            Organization::new("org1", "Harbor Authority")
                .with_faction("f2")
                .with_location("l2"),
        )
        .unwrap();
    store.insert(Organization::new("org2", "Daily Ledger")).unwrap();

    store
        .insert(
            Event::new("e1", "Rally in the capital", date(2024, 1, 10))
                .with_location("l1")
                .with_person("p1")
                .with_organization("org1"),
        )
        .unwrap();
    store
        .insert(
            Event::new("e2", "Counter-protest", date(2024, 1, 11))
                .with_parent("e1")
                .with_location("l1")
                .with_person("p2"),
        )
        .unwrap();
    store
        .insert(
            Event::new("e3", "Harbor strike", date(2024, 6, 20))
                .with_location("l2")
                .with_organization("org1"),
        )
        .unwrap();
    store
        .insert(Event::new("e4", "Checkpoint closure", date(2024, 3, 3)).with_location("l3"))
        .unwrap();

    store
        .insert(
            Narrative::new("n1", "Ballots were tampered with")
                .with_mission("m1")
                .with_status(NarrativeStatus::InProgress)
                .with_created_at(Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap())
                .with_faction_mention("f1", 30, 0.6)
                .with_faction_mention("f2", 10, -0.4)
                .with_person("p1")
                .with_person("p2")
                .with_organization("org1")
                .with_location("l1")
                .with_event("e1")
                .with_volume_point(
                    VolumePoint::new(date(2024, 1, 1))
                        .with_faction("f1", 10)
                        .with_faction("f2", 3)
                        .with_source("src1", 8)
                        .with_source("src2", 5),
                )
                .with_volume_point(
                    VolumePoint::new(date(2024, 1, 2))
                        .with_faction("f1", 5)
                        .with_source("src1", 5),
                ),
        )
        .unwrap();
    store
        .insert(
            Narrative::new("n2", "Turnout figures were inflated")
                .with_mission("m1")
                .with_created_at(Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap())
                .with_faction_mention("f2", 25, -0.2)
                .with_faction_mention("ghost", 99, 0.0)
                .with_person("p1")
                .with_organization("org1")
                .with_organization("org2")
                .with_location("l1")
                .with_location("l2")
                .with_volume_point(
                    VolumePoint::new(date(2024, 1, 2))
                        .with_faction("f2", 7)
                        .with_faction("ghost", 4)
                        .with_source("src1", 2),
                )
                .with_volume_point(
                    VolumePoint::new(date(2024, 2, 10))
                        .with_faction("f1", 0)
                        .with_faction("f2", 1),
                ),
        )
        .unwrap();
    store
        .insert(
            Narrative::new("n3", "Vaccine shipments were diverted")
                .with_mission("m2")
                .with_status(NarrativeStatus::Resolved)
                .with_created_at(Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap())
                .with_faction_mention("f3", 40, SentimentLabel::Negative)
                .with_person("p2")
                .with_organization("org2")
                .with_location("l2")
                .with_event("e3")
                .with_volume_point(
                    VolumePoint::new(date(2024, 6, 15))
                        .with_faction("f3", 12)
                        .with_source("src2", 6),
                ),
        )
        .unwrap();

    store
        .insert(
            SubNarrative::new("s1", "n1", "Ballot boxes left unsealed")
                .with_person("p1")
                .with_person("p2"),
        )
        .unwrap();
    store
        .insert(
            SubNarrative::new("s2", "n3", "Cold chain broken at the harbor")
                .with_person("p2")
                .with_organization("org2")
                .with_location("l2"),
        )
        .unwrap();

    store
        .insert(SourceCategory::new("c1", "News"))
        .unwrap();
    store
        .insert(SourceCategory::new("c2", "Social"))
        .unwrap();
    store
        .insert(Source::new("src1", "National Wire").with_category("c1"))
        .unwrap();
    store
        .insert(Source::new("src2", "Harbor Forum").with_category("c2"))
        .unwrap();

    let mut observers = Document::new("d1", "Observers report irregularities")
        .with_source("src1")
        .with_narrative("n1")
        .with_person("p1");
    observers.published_date = Some(date(2024, 1, 6));
    store.insert(observers).unwrap();

    let mut harbor = Document::new("d2", "Harbor workers speak")
        .with_source("src2")
        .with_sub_narrative("s2")
        .with_organization("org2")
        .with_location("l2")
        .with_event("e3");
    harbor.published_date = Some(date(2024, 6, 21));
    store.insert(harbor).unwrap();

    store
}
