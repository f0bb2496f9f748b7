//! Calculator form state and the transitions that drive it.
//!
//! A front end owns a [`Calculator`], turns user gestures into
//! [`FormEvent`]s and renders [`FormState`] plus the history list. All input
//! paths go through [`InputBounds::clamp`], so the engine never sees a value
//! outside the documented ranges.

use crate::config::DefaultsConfig;
use crate::{engine, BmiResult, HistoryStore, KeyValueStore, Measurement, Result, UnitSystem};

/// Inclusive range accepted for an input field
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
}

impl InputBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp to `[min, max]`. Non-finite values are rejected.
    pub fn clamp(&self, value: f64) -> Option<f64> {
        if value.is_finite() {
            Some(value.clamp(self.min, self.max))
        } else {
            None
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Editable input on the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    WeightKg,
    HeightCm,
    WeightLb,
    HeightFt,
    HeightIn,
}

impl Field {
    pub fn bounds(self) -> InputBounds {
        match self {
            Field::WeightKg => InputBounds::new(20.0, 250.0),
            Field::HeightCm => InputBounds::new(100.0, 250.0),
            Field::WeightLb => InputBounds::new(50.0, 600.0),
            Field::HeightFt => InputBounds::new(3.0, 8.0),
            Field::HeightIn => InputBounds::new(0.0, 11.0),
        }
    }

    pub fn unit(self) -> UnitSystem {
        match self {
            Field::WeightKg | Field::HeightCm => UnitSystem::Metric,
            Field::WeightLb | Field::HeightFt | Field::HeightIn => UnitSystem::Imperial,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::WeightKg => "weight (kg)",
            Field::HeightCm => "height (cm)",
            Field::WeightLb => "weight (lb)",
            Field::HeightFt => "height (ft)",
            Field::HeightIn => "height (in)",
        }
    }
}

/// User gesture fed into [`Calculator::dispatch`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormEvent {
    SelectUnit(UnitSystem),
    /// Direct text or slider entry
    Enter(Field, f64),
    Increment(Field),
    Decrement(Field),
    Calculate,
    DismissResult,
    OpenHistory,
    CloseHistory,
    ClearHistory,
}

/// Everything a front end needs to render the calculator
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub unit: UnitSystem,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub weight_lb: f64,
    pub height_ft: f64,
    pub height_in: f64,
    pub result: Option<BmiResult>,
    pub show_result: bool,
    pub show_history: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::from_defaults(&DefaultsConfig::default())
    }
}

impl FormState {
    /// Initial state from configured defaults, clamped into bounds
    pub fn from_defaults(defaults: &DefaultsConfig) -> Self {
        let mut state = Self {
            unit: defaults.unit,
            weight_kg: Field::WeightKg.bounds().min,
            height_cm: Field::HeightCm.bounds().min,
            weight_lb: Field::WeightLb.bounds().min,
            height_ft: Field::HeightFt.bounds().min,
            height_in: Field::HeightIn.bounds().min,
            result: None,
            show_result: false,
            show_history: false,
        };
        state.set(Field::WeightKg, defaults.weight_kg);
        state.set(Field::HeightCm, defaults.height_cm);
        state.set(Field::WeightLb, defaults.weight_lb);
        state.set(Field::HeightFt, defaults.height_ft);
        state.set(Field::HeightIn, defaults.height_in);
        state
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::WeightKg => self.weight_kg,
            Field::HeightCm => self.height_cm,
            Field::WeightLb => self.weight_lb,
            Field::HeightFt => self.height_ft,
            Field::HeightIn => self.height_in,
        }
    }

    /// Store a clamped value; returns what was stored, or `None` if rejected
    pub fn set(&mut self, field: Field, value: f64) -> Option<f64> {
        let clamped = field.bounds().clamp(value)?;
        if clamped != value {
            tracing::debug!("Clamped {} from {} to {}", field.label(), value, clamped);
        }
        let slot = match field {
            Field::WeightKg => &mut self.weight_kg,
            Field::HeightCm => &mut self.height_cm,
            Field::WeightLb => &mut self.weight_lb,
            Field::HeightFt => &mut self.height_ft,
            Field::HeightIn => &mut self.height_in,
        };
        *slot = clamped;
        Some(clamped)
    }

    /// Measurement built from the fields of the active unit system
    pub fn measurement(&self) -> Measurement {
        match self.unit {
            UnitSystem::Metric => Measurement::Metric {
                weight_kg: self.weight_kg,
                height_cm: self.height_cm,
            },
            UnitSystem::Imperial => Measurement::Imperial {
                weight_lb: self.weight_lb,
                height_ft: self.height_ft,
                height_in: self.height_in,
            },
        }
    }
}

/// Form state plus the history it records into
#[derive(Debug)]
pub struct Calculator<S: KeyValueStore> {
    state: FormState,
    history: HistoryStore<S>,
}

impl<S: KeyValueStore> Calculator<S> {
    pub fn new(state: FormState, history: HistoryStore<S>) -> Self {
        Self { state, history }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    /// Apply one event. Only `Calculate` and `ClearHistory` touch storage.
    pub fn dispatch(&mut self, event: FormEvent) -> Result<()> {
        tracing::trace!("Form event {:?}", event);
        match event {
            FormEvent::SelectUnit(unit) => self.state.unit = unit,
            FormEvent::Enter(field, value) => {
                if self.state.set(field, value).is_none() {
                    tracing::warn!("Ignoring non-numeric {} input", field.label());
                }
            }
            FormEvent::Increment(field) => {
                let value = self.state.get(field) + 1.0;
                self.state.set(field, value);
            }
            FormEvent::Decrement(field) => {
                let value = self.state.get(field) - 1.0;
                self.state.set(field, value);
            }
            FormEvent::Calculate => {
                let measurement = self.state.measurement();
                let result = engine::calculate(&measurement);
                self.history.record(&measurement, &result)?;
                tracing::info!("Recorded BMI {} ({})", result.score, result.category);
                self.state.result = Some(result);
                self.state.show_result = true;
            }
            FormEvent::DismissResult => self.state.show_result = false,
            FormEvent::OpenHistory => self.state.show_history = true,
            FormEvent::CloseHistory => self.state.show_history = false,
            FormEvent::ClearHistory => self.history.clear()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BmiCategory, MemoryStore};

    fn calculator() -> Calculator<MemoryStore> {
        Calculator::new(FormState::default(), HistoryStore::open(MemoryStore::new()))
    }

    #[test]
    fn test_defaults_match_initial_form() {
        let state = FormState::default();
        assert_eq!(state.unit, UnitSystem::Metric);
        assert_eq!(state.weight_kg, 70.0);
        assert_eq!(state.height_cm, 175.0);
        assert_eq!(state.weight_lb, 154.0);
        assert_eq!(state.height_ft, 5.0);
        assert_eq!(state.height_in, 9.0);
        assert!(!state.show_result);
        assert!(!state.show_history);
    }

    #[test]
    fn test_calculate_records_and_shows_result() {
        let mut calc = calculator();
        calc.dispatch(FormEvent::Calculate).unwrap();

        let result = calc.state().result.clone().unwrap();
        assert_eq!(result.score, 22.9);
        assert!(calc.state().show_result);
        assert_eq!(calc.history().len(), 1);
        assert_eq!(calc.history().list()[0].bmi, 22.9);

        calc.dispatch(FormEvent::DismissResult).unwrap();
        assert!(!calc.state().show_result);
        assert!(calc.state().result.is_some());
    }

    #[test]
    fn test_imperial_flow() {
        let mut calc = calculator();
        calc.dispatch(FormEvent::SelectUnit(UnitSystem::Imperial)).unwrap();
        calc.dispatch(FormEvent::Calculate).unwrap();

        let record = &calc.history().list()[0];
        assert_eq!(record.unit, UnitSystem::Imperial);
        assert_eq!(record.bmi, 22.7);
        assert_eq!(record.height, 69.0);
    }

    #[test]
    fn test_direct_entry_clamps_both_bounds() {
        let mut calc = calculator();
        calc.dispatch(FormEvent::Enter(Field::WeightKg, 999.0)).unwrap();
        assert_eq!(calc.state().weight_kg, 250.0);

        calc.dispatch(FormEvent::Enter(Field::WeightKg, 5.0)).unwrap();
        assert_eq!(calc.state().weight_kg, 20.0);

        calc.dispatch(FormEvent::Enter(Field::HeightCm, 0.0)).unwrap();
        assert_eq!(calc.state().height_cm, 100.0);
    }

    #[test]
    fn test_non_finite_entry_is_ignored() {
        let mut calc = calculator();
        calc.dispatch(FormEvent::Enter(Field::WeightLb, f64::NAN)).unwrap();
        assert_eq!(calc.state().weight_lb, 154.0);
    }

    #[test]
    fn test_step_buttons_stop_at_bounds() {
        let mut calc = calculator();
        calc.dispatch(FormEvent::Enter(Field::HeightIn, 11.0)).unwrap();
        calc.dispatch(FormEvent::Increment(Field::HeightIn)).unwrap();
        assert_eq!(calc.state().height_in, 11.0);

        calc.dispatch(FormEvent::Enter(Field::HeightFt, 3.0)).unwrap();
        calc.dispatch(FormEvent::Decrement(Field::HeightFt)).unwrap();
        assert_eq!(calc.state().height_ft, 3.0);

        calc.dispatch(FormEvent::Increment(Field::WeightKg)).unwrap();
        assert_eq!(calc.state().weight_kg, 71.0);
    }

    #[test]
    fn test_minimum_imperial_height_is_positive() {
        let mut calc = calculator();
        calc.dispatch(FormEvent::SelectUnit(UnitSystem::Imperial)).unwrap();
        calc.dispatch(FormEvent::Enter(Field::HeightFt, 0.0)).unwrap();
        calc.dispatch(FormEvent::Enter(Field::HeightIn, 0.0)).unwrap();
        calc.dispatch(FormEvent::Calculate).unwrap();

        let result = calc.state().result.clone().unwrap();
        assert!(result.score.is_finite());
        assert_eq!(result.category, BmiCategory::Obese);
    }

    #[test]
    fn test_history_panel_and_clear() {
        let mut calc = calculator();
        calc.dispatch(FormEvent::Calculate).unwrap();
        calc.dispatch(FormEvent::OpenHistory).unwrap();
        assert!(calc.state().show_history);

        calc.dispatch(FormEvent::ClearHistory).unwrap();
        assert!(calc.history().is_empty());
        assert!(calc.state().show_history);

        calc.dispatch(FormEvent::CloseHistory).unwrap();
        assert!(!calc.state().show_history);
    }

    #[test]
    fn test_unit_switch_keeps_other_system_values() {
        let mut calc = calculator();
        calc.dispatch(FormEvent::Enter(Field::WeightKg, 90.0)).unwrap();
        calc.dispatch(FormEvent::SelectUnit(UnitSystem::Imperial)).unwrap();
        calc.dispatch(FormEvent::SelectUnit(UnitSystem::Metric)).unwrap();
        assert_eq!(calc.state().weight_kg, 90.0);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Field::WeightLb.bounds();
        assert!(bounds.contains(50.0));
        assert!(bounds.contains(600.0));
        assert!(!bounds.contains(601.0));
        assert_eq!(Field::HeightFt.unit(), UnitSystem::Imperial);
    }
}
