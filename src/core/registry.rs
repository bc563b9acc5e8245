//! Record schema registry.
//!
//! Every record type, commit trigger, navigation page and mirrored
//! slider/spinbox pair is declared here, once. Nothing in the rest of the
//! crate knows about a specific record type.

use crate::errors::{AppError, AppResult};
use crate::models::descriptor::{CommitTrigger, FieldSpec, MirrorPair, Page, RecordDescriptor};
use crate::models::field::FieldKind;
use std::collections::{BTreeMap, BTreeSet, HashSet};

const SLIDER: FieldKind = FieldKind::Slider { min: 0, max: 10 };
pub const CUP_SIZES: &[i64] = &[8, 16, 24, 32];

const DATE: &str = RecordDescriptor::DATE_COLUMN;
const TIME: &str = RecordDescriptor::TIME_COLUMN;

pub static RECORD_TYPES: &[RecordDescriptor] = &[
    // ---------------------------
    // Sleep
    // ---------------------------
    RecordDescriptor {
        name: "sleep",
        label: "Sleep",
        table: "sleep",
        view: "sleep_view",
        fields: &[
            FieldSpec::new(DATE, "sleep_date", FieldKind::Date),
            FieldSpec::new("time_asleep", "time_asleep", FieldKind::Time),
            FieldSpec::new("time_awake", "time_awake", FieldKind::Time),
        ],
    },
    RecordDescriptor {
        name: "total_hours_slept",
        label: "Total hours slept",
        table: "total_hours_slept",
        view: "total_hours_slept_view",
        fields: &[
            FieldSpec::new(DATE, "sleep_date", FieldKind::Date),
            FieldSpec::new("total_hours_slept", "total_hours_slept", FieldKind::Duration),
        ],
    },
    RecordDescriptor {
        name: "woke_up_like",
        label: "Woke up like",
        table: "woke_up_like",
        view: "woke_up_like_view",
        fields: &[
            FieldSpec::new(DATE, "sleep_date", FieldKind::Date),
            FieldSpec::new("woke_up_like", "woke_up_like_slider", SLIDER),
        ],
    },
    RecordDescriptor {
        name: "sleep_quality",
        label: "Sleep quality",
        table: "sleep_quality",
        view: "sleep_quality_view",
        fields: &[
            FieldSpec::new(DATE, "sleep_date", FieldKind::Date),
            FieldSpec::new("sleep_quality", "sleep_quality_slider", SLIDER),
        ],
    },
    // ---------------------------
    // Diet
    // ---------------------------
    RecordDescriptor {
        name: "diet",
        label: "Diet",
        table: "diet",
        view: "diet_view",
        fields: &[
            FieldSpec::new(DATE, "diet_date", FieldKind::Date),
            FieldSpec::new(TIME, "diet_time", FieldKind::Time),
            FieldSpec::new("food_eaten", "food_eaten", FieldKind::Text),
            FieldSpec::new("calories", "calories", FieldKind::Integer),
        ],
    },
    RecordDescriptor {
        name: "hydration",
        label: "Hydration",
        table: "hydration",
        view: "hydration_view",
        fields: &[
            FieldSpec::new(DATE, "hydration_date", FieldKind::Date),
            FieldSpec::new(TIME, "hydration_time", FieldKind::Time),
            FieldSpec::new("amount", "amount", FieldKind::Choice(CUP_SIZES)),
        ],
    },
    // ---------------------------
    // Basics
    // ---------------------------
    RecordDescriptor {
        name: "shower",
        label: "Shower",
        table: "shower",
        view: "shower_view",
        fields: &[
            FieldSpec::new(DATE, "basics_date", FieldKind::Date),
            FieldSpec::new(TIME, "basics_time", FieldKind::Time),
            FieldSpec::new("shower", "shower_check", FieldKind::Check),
        ],
    },
    RecordDescriptor {
        name: "exercise",
        label: "Exercise",
        table: "exercise",
        view: "exercise_view",
        fields: &[
            FieldSpec::new(DATE, "basics_date", FieldKind::Date),
            FieldSpec::new(TIME, "basics_time", FieldKind::Time),
            FieldSpec::new("exercise", "exercise_check", FieldKind::Check),
        ],
    },
    RecordDescriptor {
        name: "teeth",
        label: "Teeth brushing",
        table: "teeth_brushing",
        view: "teeth_view",
        fields: &[
            FieldSpec::new(DATE, "basics_date", FieldKind::Date),
            FieldSpec::new(TIME, "basics_time", FieldKind::Time),
            FieldSpec::new("brushed", "tooth_check", FieldKind::Check),
        ],
    },
    // ---------------------------
    // Pet
    // ---------------------------
    RecordDescriptor {
        name: "pet_diet",
        label: "Pet diet",
        table: "pet_diet",
        view: "pet_diet_view",
        fields: &[
            FieldSpec::new(DATE, "pet_date", FieldKind::Date),
            FieldSpec::new(TIME, "pet_time", FieldKind::Time),
        ],
    },
    RecordDescriptor {
        name: "pet_mood",
        label: "Pet mood",
        table: "pet_mood",
        view: "pet_mood_view",
        fields: &[
            FieldSpec::new(DATE, "pet_date", FieldKind::Date),
            FieldSpec::new(TIME, "pet_time", FieldKind::Time),
            FieldSpec::new("mood", "pet_mood_slider", SLIDER),
            FieldSpec::new("energy", "pet_energy_slider", SLIDER),
            FieldSpec::new("activity", "pet_activity_slider", SLIDER),
        ],
    },
    RecordDescriptor {
        name: "pet_walk",
        label: "Pet walk",
        table: "pet_walk",
        view: "pet_walk_view",
        fields: &[
            FieldSpec::new(DATE, "pet_date", FieldKind::Date),
            FieldSpec::new(TIME, "pet_time", FieldKind::Time),
            FieldSpec::new("behavior", "pet_behavior_slider", SLIDER),
            FieldSpec::new("gait", "pet_gait_slider", SLIDER),
        ],
    },
    RecordDescriptor {
        name: "pet_room",
        label: "Pet time in room",
        table: "pet_time_in_room",
        view: "pet_room_view",
        fields: &[
            FieldSpec::new(DATE, "pet_date", FieldKind::Date),
            FieldSpec::new(TIME, "pet_time", FieldKind::Time),
            FieldSpec::new("time_in_room", "pet_time_in_room_slider", SLIDER),
        ],
    },
    RecordDescriptor {
        name: "pet_notes",
        label: "Pet notes",
        table: "pet_notes",
        view: "pet_notes_view",
        fields: &[
            FieldSpec::new(DATE, "pet_date", FieldKind::Date),
            FieldSpec::new(TIME, "pet_time", FieldKind::Time),
            FieldSpec::new("notes", "pet_notes", FieldKind::Text),
        ],
    },
    RecordDescriptor {
        name: "pet_walk_notes",
        label: "Pet walk notes",
        table: "pet_walk_notes",
        view: "pet_walk_notes_view",
        fields: &[
            FieldSpec::new(DATE, "pet_date", FieldKind::Date),
            FieldSpec::new(TIME, "pet_time", FieldKind::Time),
            FieldSpec::new("walk_note", "pet_walk_note", FieldKind::Text),
        ],
    },
    // ---------------------------
    // Mental self-reports
    // ---------------------------
    RecordDescriptor {
        name: "mmdmr",
        label: "Mood / mania / depression / mixed risk",
        table: "mmdmr",
        view: "mmdmr_view",
        fields: &[
            FieldSpec::new(DATE, "mmdmr_date", FieldKind::Date),
            FieldSpec::new(TIME, "mmdmr_time", FieldKind::Time),
            FieldSpec::new("mood", "mood_slider", SLIDER),
            FieldSpec::new("mania", "mania_slider", SLIDER),
            FieldSpec::new("depression", "depression_slider", SLIDER),
            FieldSpec::new("mixed_risk", "mixed_risk_slider", SLIDER),
        ],
    },
    RecordDescriptor {
        name: "cspr",
        label: "Calm / stress / pain / rage",
        table: "cspr",
        view: "cspr_view",
        fields: &[
            FieldSpec::new(DATE, "cspr_date", FieldKind::Date),
            FieldSpec::new(TIME, "cspr_time", FieldKind::Time),
            FieldSpec::new("calm", "calm_slider", SLIDER),
            FieldSpec::new("stress", "stress_slider", SLIDER),
            FieldSpec::new("pain", "pain_slider", SLIDER),
            FieldSpec::new("rage", "rage_slider", SLIDER),
        ],
    },
    RecordDescriptor {
        name: "wefe",
        label: "Wellbeing / excite / focus / energy",
        table: "wefe",
        view: "wefe_view",
        fields: &[
            FieldSpec::new(DATE, "wefe_date", FieldKind::Date),
            FieldSpec::new(TIME, "wefe_time", FieldKind::Time),
            FieldSpec::new("wellbeing", "wellbeing_slider", SLIDER),
            FieldSpec::new("excite", "excite_slider", SLIDER),
            FieldSpec::new("focus", "focus_slider", SLIDER),
            FieldSpec::new("energy", "energy_slider", SLIDER),
        ],
    },
];

pub static TRIGGERS: &[CommitTrigger] = &[
    CommitTrigger {
        name: "sleep",
        about: "Sleep times, total hours slept, waking state and quality",
        records: &["sleep", "total_hours_slept", "woke_up_like", "sleep_quality"],
        stamp: &[],
    },
    CommitTrigger {
        name: "diet",
        about: "Food eaten and calories",
        records: &["diet"],
        stamp: &[],
    },
    CommitTrigger {
        name: "hydration",
        about: "A cup of water (8, 16, 24 or 32 oz)",
        records: &["hydration"],
        stamp: &["hydration_date", "hydration_time"],
    },
    CommitTrigger {
        name: "shower",
        about: "Shower checkbox",
        records: &["shower"],
        stamp: &["basics_time"],
    },
    CommitTrigger {
        name: "exercise",
        about: "Exercise checkbox",
        records: &["exercise"],
        stamp: &["basics_time"],
    },
    CommitTrigger {
        name: "teeth",
        about: "Teeth brushing checkbox",
        records: &["teeth"],
        stamp: &["basics_time"],
    },
    CommitTrigger {
        name: "pet_diet",
        about: "Pet ate",
        records: &["pet_diet"],
        stamp: &[],
    },
    CommitTrigger {
        name: "pet_mood",
        about: "Pet mood, energy and activity",
        records: &["pet_mood"],
        stamp: &[],
    },
    CommitTrigger {
        name: "pet_walk",
        about: "Pet walk behavior and gait",
        records: &["pet_walk"],
        stamp: &[],
    },
    CommitTrigger {
        name: "pet_room",
        about: "Pet time in room",
        records: &["pet_room"],
        stamp: &[],
    },
    CommitTrigger {
        name: "pet_notes",
        about: "Free notes about the pet",
        records: &["pet_notes"],
        stamp: &[],
    },
    CommitTrigger {
        name: "pet_walk_notes",
        about: "Free notes about a walk",
        records: &["pet_walk_notes"],
        stamp: &[],
    },
    CommitTrigger {
        name: "mmdmr",
        about: "Mood, mania, depression and mixed risk self-report",
        records: &["mmdmr"],
        stamp: &[],
    },
    CommitTrigger {
        name: "cspr",
        about: "Calm, stress, pain and rage self-report",
        records: &["cspr"],
        stamp: &[],
    },
    CommitTrigger {
        name: "wefe",
        about: "Wellbeing, excite, focus and energy self-report",
        records: &["wefe"],
        stamp: &[],
    },
];

pub static PAGES: &[Page] = &[
    Page {
        name: "sleep",
        title: "Sleep data",
        records: &["sleep", "total_hours_slept", "woke_up_like", "sleep_quality"],
    },
    Page {
        name: "diet",
        title: "Diet data",
        records: &["diet", "hydration"],
    },
    Page {
        name: "basics",
        title: "Basics data",
        records: &["shower", "teeth", "exercise"],
    },
    Page {
        name: "pet",
        title: "Pet data",
        records: &[
            "pet_diet",
            "pet_mood",
            "pet_walk",
            "pet_room",
            "pet_notes",
            "pet_walk_notes",
        ],
    },
    Page {
        name: "mental",
        title: "Mental data",
        records: &["mmdmr", "cspr", "wefe"],
    },
];

pub static MIRRORS: &[MirrorPair] = &[
    MirrorPair { slider: "pet_time_in_room_slider", spinbox: "pet_time_in_room" },
    MirrorPair { slider: "pet_mood_slider", spinbox: "pet_mood" },
    MirrorPair { slider: "pet_activity_slider", spinbox: "pet_activity" },
    MirrorPair { slider: "pet_gait_slider", spinbox: "pet_gait" },
    MirrorPair { slider: "pet_behavior_slider", spinbox: "pet_behavior" },
    MirrorPair { slider: "pet_energy_slider", spinbox: "pet_energy" },
    MirrorPair { slider: "woke_up_like_slider", spinbox: "woke_up_like" },
    MirrorPair { slider: "sleep_quality_slider", spinbox: "sleep_quality" },
    MirrorPair { slider: "wellbeing_slider", spinbox: "wellbeing_spinbox" },
    MirrorPair { slider: "excite_slider", spinbox: "excite_spinbox" },
    MirrorPair { slider: "focus_slider", spinbox: "focus_spinbox" },
    MirrorPair { slider: "energy_slider", spinbox: "energy_spinbox" },
    MirrorPair { slider: "mood_slider", spinbox: "mood" },
    MirrorPair { slider: "mania_slider", spinbox: "mania" },
    MirrorPair { slider: "depression_slider", spinbox: "depression" },
    MirrorPair { slider: "mixed_risk_slider", spinbox: "mixed_risk" },
    MirrorPair { slider: "calm_slider", spinbox: "calm_spinbox" },
    MirrorPair { slider: "stress_slider", spinbox: "stress_spinbox" },
    MirrorPair { slider: "rage_slider", spinbox: "rage_spinbox" },
    MirrorPair { slider: "pain_slider", spinbox: "pain_spinbox" },
];

/// Inputs whose last value survives between sessions.
pub static PERSISTED_INPUTS: &[&str] = &[
    "pet_time_in_room_slider",
    "pet_mood_slider",
    "pet_activity_slider",
    "pet_energy_slider",
    "pet_notes",
];

/// Inputs the sleep duration is computed from, and the one it is written to.
pub const SLEEP_ASLEEP_INPUT: &str = "time_asleep";
pub const SLEEP_AWAKE_INPUT: &str = "time_awake";
pub const SLEEP_TOTAL_INPUT: &str = "total_hours_slept";

pub fn descriptor(name: &str) -> AppResult<&'static RecordDescriptor> {
    RECORD_TYPES
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| AppError::UnknownRecordType(name.to_string()))
}

pub fn trigger(name: &str) -> AppResult<&'static CommitTrigger> {
    TRIGGERS
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| AppError::UnknownRecordType(name.to_string()))
}

pub fn page(name: &str) -> Option<&'static Page> {
    PAGES.iter().find(|p| p.name == name)
}

/// Inputs read by a trigger, plus the spinboxes mirroring them.
pub fn trigger_inputs(t: &CommitTrigger) -> AppResult<BTreeSet<&'static str>> {
    let mut inputs = BTreeSet::new();
    for r in t.records {
        for f in descriptor(r)?.fields {
            inputs.insert(f.input);
        }
    }
    for m in MIRRORS {
        if inputs.contains(m.slider) {
            inputs.insert(m.spinbox);
        }
    }
    Ok(inputs)
}

/// Every input referenced by a field, with its kind. Spinboxes inherit
/// the kind of their slider.
pub fn input_layout() -> BTreeMap<&'static str, FieldKind> {
    let mut layout = BTreeMap::new();
    for d in RECORD_TYPES {
        for f in d.fields {
            layout.entry(f.input).or_insert(f.kind);
        }
    }
    for m in MIRRORS {
        if let Some(kind) = layout.get(m.slider).copied() {
            layout.insert(m.spinbox, kind);
        }
    }
    layout
}

/// Startup consistency check of the static tables above.
pub fn validate() -> AppResult<()> {
    let mut names = HashSet::new();
    let mut tables = HashSet::new();
    let mut views = HashSet::new();
    let mut kinds: BTreeMap<&str, FieldKind> = BTreeMap::new();

    for d in RECORD_TYPES {
        if !names.insert(d.name) {
            return Err(config_err(format!("duplicate record type '{}'", d.name)));
        }
        if !tables.insert(d.table) {
            return Err(config_err(format!("table '{}' used twice", d.table)));
        }
        if !views.insert(d.view) {
            return Err(config_err(format!("view '{}' used twice", d.view)));
        }
        match d.fields.first() {
            Some(f) if f.column == DATE && f.kind == FieldKind::Date => {}
            _ => {
                return Err(config_err(format!(
                    "record type '{}' must start with a date field",
                    d.name
                )));
            }
        }
        let mut cols = HashSet::new();
        for f in d.fields {
            if !cols.insert(f.column) {
                return Err(config_err(format!(
                    "column '{}' repeated in '{}'",
                    f.column, d.name
                )));
            }
            if let Some(prev) = kinds.insert(f.input, f.kind)
                && prev != f.kind
            {
                return Err(config_err(format!(
                    "input '{}' declared with two different kinds",
                    f.input
                )));
            }
        }
    }

    for t in TRIGGERS {
        for r in t.records {
            descriptor(r).map_err(|_| {
                config_err(format!("trigger '{}' references unknown '{}'", t.name, r))
            })?;
        }
        for s in t.stamp {
            match kinds.get(s) {
                Some(FieldKind::Date) | Some(FieldKind::Time) => {}
                _ => {
                    return Err(config_err(format!(
                        "trigger '{}' stamps '{}', which is not a date/time input",
                        t.name, s
                    )));
                }
            }
        }
    }

    for p in PAGES {
        for r in p.records {
            descriptor(r).map_err(|_| {
                config_err(format!("page '{}' references unknown '{}'", p.name, r))
            })?;
        }
    }

    for m in MIRRORS {
        match kinds.get(m.slider) {
            Some(FieldKind::Slider { .. }) => {}
            _ => {
                return Err(config_err(format!(
                    "mirror '{}' is not a slider input",
                    m.slider
                )));
            }
        }
        if kinds.contains_key(m.spinbox) {
            return Err(config_err(format!(
                "spinbox '{}' collides with a field input",
                m.spinbox
            )));
        }
    }

    let layout = input_layout();
    for key in PERSISTED_INPUTS {
        if !layout.contains_key(key) {
            return Err(config_err(format!("persisted input '{}' does not exist", key)));
        }
    }
    for key in [SLEEP_ASLEEP_INPUT, SLEEP_AWAKE_INPUT, SLEEP_TOTAL_INPUT] {
        if !layout.contains_key(key) {
            return Err(config_err(format!("sleep input '{}' does not exist", key)));
        }
    }

    Ok(())
}

fn config_err(msg: String) -> AppError {
    AppError::Config(msg)
}
