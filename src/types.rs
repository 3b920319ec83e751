// Types: garment options, requests and the computed size result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Garment looseness preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Holgado,
    Normal,
    Ajustado,
}

impl Fit {
    pub const ALL: [Fit; 3] = [Fit::Holgado, Fit::Normal, Fit::Ajustado];

    /// Shift applied to the size index.
    pub fn adjust(&self) -> i32 {
        match self {
            Fit::Holgado => 1,
            Fit::Normal => 0,
            Fit::Ajustado => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Fit::Holgado => "holgado",
            Fit::Normal => "normal",
            Fit::Ajustado => "ajustado",
        }
    }
}

/// Garment silhouette. Only pants and shirts carry distinct tables per cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cut {
    Regular,
    Slim,
}

impl Cut {
    pub const ALL: [Cut; 2] = [Cut::Regular, Cut::Slim];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cut::Regular => "regular",
            Cut::Slim => "slim",
        }
    }

    /// Lowercase label used in the result note.
    pub fn note_label(&self) -> &'static str {
        match self {
            Cut::Regular => "regular fit",
            Cut::Slim => "slim fit",
        }
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pantalones,
    Camisas,
    Sudaderas,
    Polos,
    Jerseys,
    Camisetas,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Pantalones,
        Category::Camisas,
        Category::Sudaderas,
        Category::Polos,
        Category::Jerseys,
        Category::Camisetas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pantalones => "pantalones",
            Category::Camisas => "camisas",
            Category::Sudaderas => "sudaderas",
            Category::Polos => "polos",
            Category::Jerseys => "jerseys",
            Category::Camisetas => "camisetas",
        }
    }

    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Pantalones => "Pantalones",
            Category::Camisas => "Camisas",
            Category::Sudaderas => "Sudaderas",
            Category::Polos => "Polos",
            Category::Jerseys => "Jerseys",
            Category::Camisetas => "Camisetas",
        }
    }

    /// Whether the category has regular/slim variants with their own tables.
    pub fn has_cut(&self) -> bool {
        matches!(self, Category::Pantalones | Category::Camisas)
    }
}

/// Sex as collected by the form. Has no effect on the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Masculino,
    Femenino,
    Otro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    Cm,
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

/// A/B/C garment measurements in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// One row of a measurement table, keyed by the size it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRow<K> {
    pub size: K,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl<K> MeasurementRow<K> {
    pub fn measurements(&self) -> Measurements {
        Measurements {
            a: self.a,
            b: self.b,
            c: self.c,
        }
    }
}

/// Upper BMI bound (exclusive) and the scale index it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiBucket {
    pub max: f64,
    pub index: usize,
}

/// Normalized input to the calculator: centimeters and kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRequest {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub fit: Fit,
    pub category: Category,
    pub cut: Cut,
}

/// Recommended size returned by the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeResult {
    pub size: String,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,
}

/// Failure to parse one of the enumerated options from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

fn parse_error(kind: &'static str, value: &str, expected: &'static str) -> ParseError {
    ParseError {
        kind,
        value: value.to_string(),
        expected,
    }
}

impl FromStr for Fit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "holgado" => Ok(Fit::Holgado),
            "normal" => Ok(Fit::Normal),
            "ajustado" => Ok(Fit::Ajustado),
            _ => Err(parse_error("fit", s, "holgado, normal, ajustado")),
        }
    }
}

impl FromStr for Cut {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Cut::Regular),
            "slim" => Ok(Cut::Slim),
            _ => Err(parse_error("cut", s, "regular, slim")),
        }
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s_lower)
            .ok_or_else(|| {
                parse_error(
                    "category",
                    s,
                    "pantalones, camisas, sudaderas, polos, jerseys, camisetas",
                )
            })
    }
}

impl FromStr for Sex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "masculino" => Ok(Sex::Masculino),
            "femenino" => Ok(Sex::Femenino),
            "otro" => Ok(Sex::Otro),
            _ => Err(parse_error("sex", s, "masculino, femenino, otro")),
        }
    }
}

impl FromStr for HeightUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" => Ok(HeightUnit::Cm),
            "in" => Ok(HeightUnit::In),
            _ => Err(parse_error("height unit", s, "cm, in")),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lb" => Ok(WeightUnit::Lb),
            _ => Err(parse_error("weight unit", s, "kg, lb")),
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Cut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SizeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cm / {} kg / {} / {} / {}",
            self.height_cm, self.weight_kg, self.fit, self.category, self.cut
        )
    }
}

impl fmt::Display for SizeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  talla:   {}", self.size)?;
        if let Some(range) = &self.range {
            writeln!(f, "  rango:   {}", range)?;
        }
        if let Some(m) = &self.measurements {
            writeln!(f, "  medidas: A {} cm | B {} cm | C {} cm", m.a, m.b, m.c)?;
        }
        write!(f, "  nota:    {}", self.note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_case_insensitive() {
        assert_eq!("Holgado".parse::<Fit>(), Ok(Fit::Holgado));
        assert_eq!(" slim ".parse::<Cut>(), Ok(Cut::Slim));
        assert_eq!("CAMISAS".parse::<Category>(), Ok(Category::Camisas));
        assert_eq!("lb".parse::<WeightUnit>(), Ok(WeightUnit::Lb));
    }

    #[test]
    fn test_parse_unknown_option() {
        let err = "oversize".parse::<Fit>().unwrap_err();
        assert_eq!(err.kind, "fit");
        assert!(err.to_string().contains("oversize"));
    }

    #[test]
    fn test_only_pants_and_shirts_have_cut() {
        let with_cut: Vec<_> = Category::ALL.iter().filter(|c| c.has_cut()).collect();
        assert_eq!(with_cut, vec![&Category::Pantalones, &Category::Camisas]);
    }

    #[test]
    fn test_result_json_omits_missing_fields() {
        let result = SizeResult {
            size: "M".to_string(),
            note: "nota".to_string(),
            range: None,
            measurements: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"size":"M","note":"nota"}"#);
    }
}
