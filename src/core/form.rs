//! Headless form state.
//!
//! Holds the current value of every input declared in the registry and
//! keeps mirrored slider/spinbox inputs in sync. The commit protocol reads
//! it through `FieldSource`.

use crate::core::commit::FieldSource;
use crate::core::duration::compute_sleep_duration;
use crate::core::registry::{
    MIRRORS, SLEEP_ASLEEP_INPUT, SLEEP_AWAKE_INPUT, SLEEP_TOTAL_INPUT, input_layout,
};
use crate::errors::{AppError, AppResult};
use crate::models::field::{FieldKind, FieldValue};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Input {
    kind: FieldKind,
    value: FieldValue,
}

#[derive(Debug, Clone)]
pub struct FormState {
    inputs: BTreeMap<&'static str, Input>,
    mirrors: BTreeMap<&'static str, &'static str>,
}

impl FormState {
    /// Every date input set to `today`, every time input to `now`.
    pub fn new(today: NaiveDate, now: NaiveTime) -> Self {
        let inputs = input_layout()
            .into_iter()
            .map(|(name, kind)| {
                let value = initial_value(kind, today, now);
                (name, Input { kind, value })
            })
            .collect();

        let mut mirrors = BTreeMap::new();
        for m in MIRRORS {
            mirrors.insert(m.slider, m.spinbox);
            mirrors.insert(m.spinbox, m.slider);
        }

        let mut form = Self { inputs, mirrors };
        form.update_sleep_total();
        form
    }

    pub fn kind(&self, input: &str) -> Option<FieldKind> {
        self.inputs.get(input).map(|i| i.kind)
    }

    pub fn get(&self, input: &str) -> Option<&FieldValue> {
        self.inputs.get(input).map(|i| &i.value)
    }

    pub fn inputs(&self) -> impl Iterator<Item = (&'static str, FieldKind, &FieldValue)> + '_ {
        self.inputs.iter().map(|(n, i)| (*n, i.kind, &i.value))
    }

    /// Set an input (and its mirror). Invalid values change nothing.
    pub fn set(&mut self, input: &str, value: FieldValue) -> AppResult<()> {
        let kind = self
            .kind(input)
            .ok_or_else(|| AppError::UnknownInput(input.to_string()))?;

        // text inputs may be cleared
        let value = match (kind, value) {
            (FieldKind::Text, FieldValue::Text(s)) => FieldValue::Text(s),
            (kind, v) => kind.realize(input, Some(v))?,
        };

        if let Some(mirror) = self.mirrors.get(input).copied()
            && let Some(slot) = self.inputs.get_mut(mirror)
        {
            slot.value = value.clone();
        }
        if let Some(slot) = self.inputs.get_mut(input) {
            slot.value = value;
        }
        Ok(())
    }

    /// Parse `raw` according to the kind of `input`, then set it.
    pub fn set_str(&mut self, input: &str, raw: &str) -> AppResult<()> {
        let kind = self
            .kind(input)
            .ok_or_else(|| AppError::UnknownInput(input.to_string()))?;

        let value = match kind {
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            other => other.parse(input, raw)?,
        };
        self.set(input, value)
    }

    /// Reset a date or time input to the given instant.
    pub fn stamp(&mut self, input: &str, today: NaiveDate, now: NaiveTime) -> AppResult<()> {
        match self.kind(input) {
            Some(FieldKind::Date) => self.set(input, FieldValue::Date(today)),
            Some(FieldKind::Time) => self.set(input, FieldValue::Time(now)),
            Some(other) => Err(AppError::invalid_input(
                input,
                format!("cannot stamp a {} input", other.name()),
            )),
            None => Err(AppError::UnknownInput(input.to_string())),
        }
    }

    /// Recompute the total-hours-slept input from the asleep/awake inputs.
    pub fn update_sleep_total(&mut self) -> Option<String> {
        let asleep = match self.get(SLEEP_ASLEEP_INPUT) {
            Some(FieldValue::Time(t)) => *t,
            _ => return None,
        };
        let awake = match self.get(SLEEP_AWAKE_INPUT) {
            Some(FieldValue::Time(t)) => *t,
            _ => return None,
        };

        let total = compute_sleep_duration(awake, asleep);
        if let Some(slot) = self.inputs.get_mut(SLEEP_TOTAL_INPUT) {
            slot.value = FieldValue::Text(total.clone());
        }
        Some(total)
    }
}

impl FieldSource for FormState {
    fn value(&self, input: &str) -> Option<FieldValue> {
        self.get(input).cloned()
    }
}

fn initial_value(kind: FieldKind, today: NaiveDate, now: NaiveTime) -> FieldValue {
    match kind {
        FieldKind::Date => FieldValue::Date(today),
        FieldKind::Time => FieldValue::Time(now),
        FieldKind::Slider { min, .. } => FieldValue::Int(min),
        FieldKind::Integer => FieldValue::Int(0),
        FieldKind::Choice(values) => FieldValue::Int(values.first().copied().unwrap_or(0)),
        FieldKind::Check => FieldValue::Bool(false),
        FieldKind::Text => FieldValue::Text(String::new()),
        FieldKind::Duration => FieldValue::Text("00:00".to_string()),
    }
}
