use serde::{Deserialize, Deserializer, Serialize};

/// A confidence-scored value from a detailed (v8) response.
///
/// Veryfi wraps each extracted scalar as
/// `{"value": ..., "score": ..., "ocr_score": ..., "bounding_box": [...],
/// "bounding_region": [...], "rotation": ...}`. Fields Veryfi reports without
/// detail (a bare `97.66`) decode into a `Field` carrying only the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field<T> {
    pub value: Option<T>,
    /// Extraction confidence, 0.0–1.0.
    pub score: Option<f64>,
    /// OCR confidence, 0.0–1.0.
    pub ocr_score: Option<f64>,
    /// `[page, x_min, y_min, x_max, y_max]`, normalised to the page size.
    pub bounding_box: Vec<f64>,
    /// Polygon corners as a flat `[x1, y1, x2, y2, ...]` list.
    pub bounding_region: Vec<f64>,
    /// Rotation of the region in degrees.
    pub rotation: Option<f64>,
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self {
            value: Some(value),
            score: None,
            ocr_score: None,
            bounding_box: Vec::new(),
            bounding_region: Vec::new(),
            rotation: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct Scored<T> {
    value: Option<T>,
    score: Option<f64>,
    ocr_score: Option<f64>,
    bounding_box: Option<Vec<f64>>,
    bounding_region: Option<Vec<f64>>,
    rotation: Option<f64>,
}

impl<T> Default for Scored<T> {
    fn default() -> Self {
        Self {
            value: None,
            score: None,
            ocr_score: None,
            bounding_box: None,
            bounding_region: None,
            rotation: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr<T> {
    Scored(Scored<T>),
    Bare(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Repr<T>>::deserialize(deserializer)? {
            None => Field::default(),
            Some(Repr::Bare(value)) => Field::from(value),
            Some(Repr::Scored(s)) => Field {
                value: s.value,
                score: s.score,
                ocr_score: s.ocr_score,
                bounding_box: s.bounding_box.unwrap_or_default(),
                bounding_region: s.bounding_region.unwrap_or_default(),
                rotation: s.rotation,
            },
        })
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self {
            value: None,
            score: None,
            ocr_score: None,
            bounding_box: Vec::new(),
            bounding_region: Vec::new(),
            rotation: None,
        }
    }
}
