//! BMI engine: unit conversion, rounding and classification.
//!
//! Everything here is a pure function of its inputs. Inputs are expected to
//! be range-checked by the caller (see [`crate::form`]); a zero height gives
//! a non-finite score rather than an error.

use crate::{BmiCategory, BmiResult, Measurement};
use rust_decimal::{Decimal, RoundingStrategy};

/// Multiplier that converts lb/in² into kg/m²
pub const IMPERIAL_FACTOR: f64 = 703.0;

/// `weight_kg / (height_cm / 100)^2`
pub fn bmi_metric(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// `(weight_lb / total_inches^2) * 703`
pub fn bmi_imperial(weight_lb: f64, height_ft: f64, height_in: f64) -> f64 {
    let inches = crate::total_inches(height_ft, height_in);
    (weight_lb / (inches * inches)) * IMPERIAL_FACTOR
}

/// Round to one decimal place, halves rounding up
///
/// Works on the exact decimal expansion of `value`, so `18.4499…` stays
/// `18.4` even though `18.4499… * 10` would land on a tie. Values outside
/// the `Decimal` range (or non-finite) are returned unchanged.
pub fn round1(value: f64) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(1);
            rounded.mantissa() as f64 / 10.0
        }
        None => value,
    }
}

/// Classify a rounded score. Bands are half-open and checked in order.
pub fn classify(score: f64) -> BmiCategory {
    if score < 18.5 {
        BmiCategory::Underweight
    } else if score < 25.0 {
        BmiCategory::Normal
    } else if score < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Compute the rounded score and its category for a measurement
pub fn calculate(measurement: &Measurement) -> BmiResult {
    let raw = match *measurement {
        Measurement::Metric {
            weight_kg,
            height_cm,
        } => bmi_metric(weight_kg, height_cm),
        Measurement::Imperial {
            weight_lb,
            height_ft,
            height_in,
        } => bmi_imperial(weight_lb, height_ft, height_in),
    };

    let score = round1(raw);
    let category = classify(score);

    tracing::debug!(
        "Computed BMI {} ({}) from {:?}",
        score,
        category,
        measurement
    );

    BmiResult {
        score,
        category,
        color: category.color(),
        range: category.range_label(),
    }
}
