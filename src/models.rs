use serde::{Deserialize, Serialize};

/// One of the two buildings the catalog is partitioned into
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Building {
    #[default]
    One,
    Two,
}

impl Building {
    pub const ALL: [Building; 2] = [Building::One, Building::Two];

    pub fn number(&self) -> u8 {
        match self {
            Building::One => 1,
            Building::Two => 2,
        }
    }

    /// Marketing name of the building
    pub fn label(&self) -> &'static str {
        match self {
            Building::One => "Family",
            Building::Two => "Business",
        }
    }
}

impl TryFrom<u8> for Building {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Building::One),
            2 => Ok(Building::Two),
            other => Err(format!("unknown building {}", other)),
        }
    }
}

impl From<Building> for u8 {
    fn from(building: Building) -> Self {
        building.number()
    }
}

/// Sales status of a unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Available,
    Booked,
    Sold,
}

/// A single sellable lot from the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub code: String,
    pub building: Building,
    pub floor: i32,
    /// Square meters
    pub area: f64,
    /// Smallest currency unit
    pub price: u64,
    pub status: UnitStatus,
    #[serde(default)]
    pub layout_url: Option<String>,
}

/// Whole-catalog counters as reported by the server
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub available: u32,
    pub booked: u32,
    pub sold: u32,
    pub total: u32,
}

/// Raw body of the catalog endpoint
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub lots: Vec<Unit>,
    #[serde(default)]
    pub stats: CatalogStats,
}

/// A catalog accepted by the loader: non-empty and flagged ok
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    pub units: Vec<Unit>,
    pub stats: CatalogStats,
}

/// Minimal description of a unit sent along with a request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LotPayload {
    pub code: String,
    pub building: Building,
    pub floor: i32,
    pub price: u64,
    pub area: f64,
}

impl From<&Unit> for LotPayload {
    fn from(unit: &Unit) -> Self {
        LotPayload {
            code: unit.code.clone(),
            building: unit.building,
            floor: unit.floor,
            price: unit.price,
            area: unit.area,
        }
    }
}

/// Body of the submission endpoint
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub lot: LotPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_response() {
        let body = r#"{
            "ok": true,
            "lots": [
                {"code": "A1", "building": 1, "floor": 5, "area": 45.5, "price": 5200000, "status": "available", "layout_url": "https://cdn/a1.png"},
                {"code": "B7", "building": 2, "floor": 3, "area": 60, "price": 8100000, "status": "sold"}
            ],
            "stats": {"available": 1, "booked": 0, "sold": 1, "total": 2}
        }"#;
        let resp: CatalogResponse = serde_json::from_str(body).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.lots.len(), 2);
        assert_eq!(resp.lots[0].building, Building::One);
        assert_eq!(resp.lots[1].status, UnitStatus::Sold);
        assert_eq!(resp.lots[1].layout_url, None);
        assert_eq!(resp.stats.total, 2);
    }

    #[test]
    fn test_unknown_building_is_rejected() {
        let body = r#"{"code": "C1", "building": 3, "floor": 1, "area": 30, "price": 1, "status": "available"}"#;
        assert!(serde_json::from_str::<Unit>(body).is_err());
    }

    #[test]
    fn test_payload_omits_missing_user_id() {
        let unit = Unit {
            code: "A1".into(),
            building: Building::One,
            floor: 5,
            area: 45.0,
            price: 5_200_000,
            status: UnitStatus::Available,
            layout_url: None,
        };
        let payload = SubmissionPayload { lot: LotPayload::from(&unit), user_id: None };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["lot"]["building"], 1);
        assert_eq!(json["lot"]["code"], "A1");
        assert!(json.get("user_id").is_none());
    }
}
