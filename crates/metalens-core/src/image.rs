//! Social image size classification
//!
//! Loading the `og:image` and reading its natural size happens outside this
//! crate; callers hand the measured dimensions to [`ImageAnalysis::from_dimensions`].

use serde::{Deserialize, Serialize};

use crate::rules::{IMAGE_MIN_SIZE, IMAGE_RECOMMENDED_SIZE};

/// How well an image fits platform size requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Meets or exceeds the recommended size
    Optimal,
    /// Meets the minimum but is below the recommended size
    Acceptable,
    /// Below the minimum size
    Issues,
}

/// Measured size of the social image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub width: u32,
    pub height: u32,
    /// `None` when the measurement could not be classified
    pub overall_status: Option<ImageFit>,
}

impl ImageAnalysis {
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            overall_status: Some(classify_dimensions(width, height)),
        }
    }
}

pub fn classify_dimensions(width: u32, height: u32) -> ImageFit {
    let (rec_w, rec_h) = IMAGE_RECOMMENDED_SIZE;
    let (min_w, min_h) = IMAGE_MIN_SIZE;

    if width >= rec_w && height >= rec_h {
        ImageFit::Optimal
    } else if width >= min_w && height >= min_h {
        ImageFit::Acceptable
    } else {
        ImageFit::Issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dimensions() {
        assert_eq!(classify_dimensions(1200, 630), ImageFit::Optimal);
        assert_eq!(classify_dimensions(2400, 1260), ImageFit::Optimal);
        assert_eq!(classify_dimensions(1199, 630), ImageFit::Acceptable);
        assert_eq!(classify_dimensions(1200, 629), ImageFit::Acceptable);
        assert_eq!(classify_dimensions(200, 200), ImageFit::Acceptable);
        assert_eq!(classify_dimensions(199, 200), ImageFit::Issues);
        assert_eq!(classify_dimensions(1200, 150), ImageFit::Issues);
        assert_eq!(classify_dimensions(0, 0), ImageFit::Issues);
    }

    #[test]
    fn test_from_dimensions_sets_status() {
        let analysis = ImageAnalysis::from_dimensions(600, 315);
        assert_eq!(analysis.width, 600);
        assert_eq!(analysis.height, 315);
        assert_eq!(analysis.overall_status, Some(ImageFit::Acceptable));
    }

    #[test]
    fn test_deserialize_from_collaborator_json() {
        let analysis: ImageAnalysis =
            serde_json::from_str(r#"{"width": 100, "height": 80, "overallStatus": "issues"}"#).unwrap();
        assert_eq!(analysis.overall_status, Some(ImageFit::Issues));

        let unknown: ImageAnalysis =
            serde_json::from_str(r#"{"width": 100, "height": 80, "overallStatus": null}"#).unwrap();
        assert!(unknown.overall_status.is_none());
    }
}
