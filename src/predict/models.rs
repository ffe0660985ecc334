//! Fixed table of public concept models.
//!
//! The service identifies models by opaque IDs; callers select them by
//! name from this table. The table is immutable and resolved both at
//! configuration load and again per prediction call.

/// Face detection runs against a fixed public model, not a selectable
/// one.
pub const FACE_DETECTION_MODEL_ID: &str = "a403429f2ddf4b49b307e318f00e528b";

/// Public concept models known to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Apparel,
    Food,
    General,
    LandscapeQuality,
    Moderation,
    Nsfw,
    PortraitQuality,
    TexturesAndPatterns,
    Travel,
    Wedding,
}

impl ModelKind {
    pub const ALL: [ModelKind; 10] = [
        ModelKind::Apparel,
        ModelKind::Food,
        ModelKind::General,
        ModelKind::LandscapeQuality,
        ModelKind::Moderation,
        ModelKind::Nsfw,
        ModelKind::PortraitQuality,
        ModelKind::TexturesAndPatterns,
        ModelKind::Travel,
        ModelKind::Wedding,
    ];

    /// Resolve a human-readable model name. Returns `None` for names
    /// outside the fixed preset set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ApparelModel" => Some(ModelKind::Apparel),
            "FoodModel" => Some(ModelKind::Food),
            "GeneralModel" => Some(ModelKind::General),
            "LandscapeQualityModel" => Some(ModelKind::LandscapeQuality),
            "ModerationModel" => Some(ModelKind::Moderation),
            "NsfwModel" => Some(ModelKind::Nsfw),
            "PortraitQualityModel" => Some(ModelKind::PortraitQuality),
            "TexturesAndPatternsModel" => Some(ModelKind::TexturesAndPatterns),
            "TravelModel" => Some(ModelKind::Travel),
            "WeddingModel" => Some(ModelKind::Wedding),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Apparel => "ApparelModel",
            ModelKind::Food => "FoodModel",
            ModelKind::General => "GeneralModel",
            ModelKind::LandscapeQuality => "LandscapeQualityModel",
            ModelKind::Moderation => "ModerationModel",
            ModelKind::Nsfw => "NsfwModel",
            ModelKind::PortraitQuality => "PortraitQualityModel",
            ModelKind::TexturesAndPatterns => "TexturesAndPatternsModel",
            ModelKind::Travel => "TravelModel",
            ModelKind::Wedding => "WeddingModel",
        }
    }

    /// Opaque model identifier recognized by the service.
    pub fn id(self) -> &'static str {
        match self {
            ModelKind::Apparel => "e0be3b9d6a454f0493ac3a30784001ff",
            ModelKind::Food => "bd367be194cf45149e75f01d59f77ba7",
            ModelKind::General => "aaa03c23b3724a16a56b629203edc62c",
            ModelKind::LandscapeQuality => "bec14810deb94c40a05f1f0eb3c91403",
            ModelKind::Moderation => "d16f390eb32cad478c7ae150069bd2c6",
            ModelKind::Nsfw => "e9576d86d2004ed1a38ba0cf39ecb4b1",
            ModelKind::PortraitQuality => "de9bd05cfdbf4534af151beb2a5d0953",
            ModelKind::TexturesAndPatterns => "fbefb47f9fdb410e8ce14f24f54b47ff",
            ModelKind::Travel => "eee28c313d69466f836ab83287a54ed9",
            ModelKind::Wedding => "c386b7a870114f4a87477c0824499348",
        }
    }
}
