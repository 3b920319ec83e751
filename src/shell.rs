// Form shell: raw form input up to the calculator. Unit conversion, validation
// with the user-facing messages, age, guide images and the A/B/C copy.
// The calculator is only called once validation passes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::logic;
use crate::types::*;

/// Validation failures shown to the user instead of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Selecciona tu año de nacimiento.")]
    MissingBirthYear,

    #[error("El año de nacimiento no es valido.")]
    InvalidAge { age: i32 },

    #[error("Revisa altura y peso. Usa valores reales (ejemplo: 175 cm / 72 kg).")]
    ImplausibleBody,
}

/// Controlled form values, kept as typed text like the inputs they mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub sex: Sex,
    pub birth_year: String,
    pub height: String,
    pub weight: String,
    pub category: Category,
    pub cut: Cut,
    pub fit: Fit,
    pub height_unit: HeightUnit,
    pub weight_unit: WeightUnit,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            sex: Sex::Masculino,
            birth_year: String::new(),
            height: "175".to_string(),
            weight: "72".to_string(),
            category: Category::Camisas,
            cut: Cut::Regular,
            fit: Fit::Normal,
            height_unit: HeightUnit::Cm,
            weight_unit: WeightUnit::Kg,
        }
    }
}

/// Numeric value of a text field. Blank reads as zero; anything unparsable is `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|v| !v.is_nan())
}

pub fn to_cm(value: f64, unit: HeightUnit) -> f64 {
    match unit {
        HeightUnit::Cm => value,
        HeightUnit::In => value * CM_PER_INCH,
    }
}

pub fn to_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => value,
        WeightUnit::Lb => value * KG_PER_POUND,
    }
}

/// Display text after conversion: whole numbers for metric, one decimal otherwise.
fn format_converted(value: f64, metric: bool) -> String {
    if metric {
        format!("{}", value.round())
    } else {
        format!("{}", (value * 10.0).round() / 10.0)
    }
}

impl FormState {
    /// Convert the visible height into `next`. Blank or non-numeric text keeps
    /// its value and only the unit changes.
    pub fn switch_height_unit(&mut self, next: HeightUnit) {
        if self.height_unit == next {
            return;
        }
        if let Some(raw) = parse_number(&self.height).filter(|v| *v != 0.0) {
            self.height = match next {
                HeightUnit::Cm => format_converted(raw * CM_PER_INCH, true),
                HeightUnit::In => format_converted(raw / CM_PER_INCH, false),
            };
        }
        self.height_unit = next;
    }

    /// Weight counterpart of [`FormState::switch_height_unit`].
    pub fn switch_weight_unit(&mut self, next: WeightUnit) {
        if self.weight_unit == next {
            return;
        }
        if let Some(raw) = parse_number(&self.weight).filter(|v| *v != 0.0) {
            self.weight = match next {
                WeightUnit::Kg => format_converted(raw * KG_PER_POUND, true),
                WeightUnit::Lb => format_converted(raw / KG_PER_POUND, false),
            };
        }
        self.weight_unit = next;
    }

    /// Age implied by the selected birth year, if one is selected.
    pub fn age(&self, current_year: i32) -> Option<i32> {
        self.birth_year
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(|year| current_year.checked_sub(year))
    }

    /// Check the form and build a normalized request.
    /// Order: birth year, age, then height and weight after unit conversion.
    pub fn validate(&self, current_year: i32) -> Result<SizeRequest, FormError> {
        let birth_year = self
            .birth_year
            .trim()
            .parse::<i32>()
            .map_err(|_| FormError::MissingBirthYear)?;

        // Saturates to i32::MIN/MAX, both outside the accepted ages
        let age = current_year.saturating_sub(birth_year);
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(FormError::InvalidAge { age });
        }

        let height_cm = parse_number(&self.height).map(|v| to_cm(v, self.height_unit));
        let weight_kg = parse_number(&self.weight).map(|v| to_kg(v, self.weight_unit));
        match (height_cm, weight_kg) {
            (Some(height_cm), Some(weight_kg))
                if (MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height_cm)
                    && (MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight_kg) =>
            {
                Ok(SizeRequest {
                    height_cm,
                    weight_kg,
                    fit: self.fit,
                    category: self.category,
                    cut: self.cut,
                })
            }
            _ => Err(FormError::ImplausibleBody),
        }
    }
}

/// Validate, then compute. The calculator is never reached on a form error.
pub fn submit(form: &FormState, current_year: i32) -> Result<SizeResult, FormError> {
    let request = form.validate(current_year).map_err(|e| {
        tracing::info!(error = %e, "form rejected");
        e
    })?;
    tracing::debug!(%request, "computing size");
    let result = logic::compute(&request);
    tracing::info!(size = %result.size, range = ?result.range, "size computed");
    Ok(result)
}

/// Birth years offered by the selector, newest first.
pub fn birth_year_options(current_year: i32) -> Vec<i32> {
    ((current_year - OLDEST_LISTED_AGE)..=(current_year - YOUNGEST_LISTED_AGE))
        .rev()
        .collect()
}

/// Size-guide illustration for a category and cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuideImage {
    pub title: &'static str,
    pub src: &'static str,
}

const fn guide(title: &'static str, src: &'static str) -> GuideImage {
    GuideImage { title, src }
}

/// Guide image for `category`. Slim falls back to regular where no slim image exists.
pub fn guide_for(category: Category, cut: Cut) -> GuideImage {
    match (category, cut) {
        (Category::Pantalones, Cut::Regular) => {
            guide("Pantalon regular fit", "/guides/pantalon-regular.png")
        }
        (Category::Pantalones, Cut::Slim) => {
            guide("Pantalon slim fit", "/guides/pantalon-slim.png")
        }
        (Category::Camisas, Cut::Regular) => {
            guide("Camisa regular fit", "/guides/camisa-regular.png")
        }
        (Category::Camisas, Cut::Slim) => guide("Camisa slim fit", "/guides/camisa-slim.png"),
        (Category::Sudaderas, _) => guide("Sudadera capucha", "/guides/sudadera-capucha.png"),
        (Category::Polos, _) => guide("Polo manga corta", "/guides/polo-manga-corta.png"),
        (Category::Jerseys, _) => guide("Jersey", "/guides/jersey.png"),
        (Category::Camisetas, _) => {
            guide("Camiseta regular fit", "/guides/camiseta-regular.png")
        }
    }
}

/// Text shown in place of a guide image that failed to load.
pub fn guide_placeholder(image: &GuideImage) -> String {
    format!("Sube la imagen en `public/guides` con el nombre {}", image.src)
}

/// What A, B and C mean for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbcCopy {
    pub a: &'static str,
    pub b: &'static str,
    pub c: &'static str,
}

pub fn abc_copy(category: Category) -> AbcCopy {
    match category {
        Category::Pantalones => AbcCopy {
            a: "A: ancho de cintura.",
            b: "B: tiro de pantalon.",
            c: "C: largo total.",
        },
        _ => AbcCopy {
            a: "A: largo de la manga.",
            b: "B: ancho de pecho.",
            c: "C: largo total.",
        },
    }
}

/// Plain-text result card.
pub fn render_result(result: &SizeResult, category: Category, age: Option<i32>) -> String {
    let mut lines = vec!["Talla sugerida".to_string(), result.size.clone()];
    if let Some(range) = &result.range {
        lines.push(format!("Entre {}", range));
    }
    match age {
        Some(age) if age != 0 => lines.push(format!("{} | edad {} años", result.note, age)),
        _ => lines.push(result.note.clone()),
    }
    lines.push("Esto es una recomendacion basada en altura, peso y fit.".to_string());

    let copy = abc_copy(category);
    lines.push("Que significan A, B y C".to_string());
    lines.extend([copy.a, copy.b, copy.c].map(String::from));
    if let Some(m) = &result.measurements {
        lines.push(format!("A: {} cm  B: {} cm  C: {} cm", m.a, m.b, m.c));
    }
    lines.join("\n")
}
