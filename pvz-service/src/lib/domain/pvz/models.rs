use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::pvz::errors::CityError;
use crate::domain::pvz::errors::IdError;
use crate::domain::pvz::errors::ProductTypeError;
use crate::domain::pvz::errors::PvzError;
use crate::domain::pvz::errors::ReceptionStatusError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an identifier from its UUID string form.
            ///
            /// # Errors
            /// * `InvalidFormat` - String is not a valid UUID
            pub fn from_string(s: &str) -> Result<Self, IdError> {
                Uuid::parse_str(s)
                    .map($name)
                    .map_err(|e| IdError::InvalidFormat(e.to_string()))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Pickup point identifier.
    PvzId
);
uuid_id!(
    /// Reception identifier.
    ReceptionId
);
uuid_id!(
    /// Product identifier.
    ProductId
);

/// Cities in which pickup points may be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Moscow,
    SaintPetersburg,
    Kazan,
}

impl City {
    pub const ALL: [City; 3] = [City::Moscow, City::SaintPetersburg, City::Kazan];

    /// Membership check for raw city names.
    ///
    /// Accepts the canonical Russian name or its English alias; aliases
    /// ignore ASCII case.
    ///
    /// # Errors
    /// * `Unknown` - Not a supported city
    pub fn parse(raw: &str) -> Result<Self, CityError> {
        let value = raw.trim();
        City::ALL
            .into_iter()
            .find(|city| value == city.as_str() || value.eq_ignore_ascii_case(city.alias()))
            .ok_or_else(|| CityError::Unknown(raw.to_string()))
    }

    /// Canonical wire and storage value.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Moscow => "Москва",
            City::SaintPetersburg => "Санкт-Петербург",
            City::Kazan => "Казань",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            City::Moscow => "Moscow",
            City::SaintPetersburg => "Saint Petersburg",
            City::Kazan => "Kazan",
        }
    }
}

impl FromStr for City {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::parse(s)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of items logged during a reception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Electronics,
    Clothes,
    Shoes,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Electronics,
        ProductType::Clothes,
        ProductType::Shoes,
    ];

    /// Membership check for raw product type names (canonical or English alias).
    ///
    /// # Errors
    /// * `Unknown` - Not a supported product type
    pub fn parse(raw: &str) -> Result<Self, ProductTypeError> {
        let value = raw.trim();
        ProductType::ALL
            .into_iter()
            .find(|kind| value == kind.as_str() || value.eq_ignore_ascii_case(kind.alias()))
            .ok_or_else(|| ProductTypeError::Unknown(raw.to_string()))
    }

    /// Canonical wire and storage value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Electronics => "электроника",
            ProductType::Clothes => "одежда",
            ProductType::Shoes => "обувь",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            ProductType::Electronics => "electronics",
            ProductType::Clothes => "clothes",
            ProductType::Shoes => "shoes",
        }
    }
}

impl FromStr for ProductType {
    type Err = ProductTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::parse(s)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reception lifecycle: `InProgress` → `Closed`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceptionStatus {
    InProgress,
    Closed,
}

impl ReceptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceptionStatus::InProgress => "in_progress",
            ReceptionStatus::Closed => "close",
        }
    }

    /// Parse a stored status value.
    ///
    /// # Errors
    /// * `Unknown` - Value is neither `in_progress` nor `close`
    pub fn parse(raw: &str) -> Result<Self, ReceptionStatusError> {
        match raw {
            "in_progress" => Ok(ReceptionStatus::InProgress),
            "close" => Ok(ReceptionStatus::Closed),
            other => Err(ReceptionStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pickup point. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pvz {
    pub id: PvzId,
    pub registration_date: DateTime<Utc>,
    pub city: City,
}

impl Pvz {
    pub fn register(city: City, now: DateTime<Utc>) -> Self {
        Self {
            id: PvzId::new(),
            registration_date: now,
            city,
        }
    }
}

/// Intake session at a pickup point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    pub id: ReceptionId,
    pub date_time: DateTime<Utc>,
    pub pvz_id: PvzId,
    pub status: ReceptionStatus,
}

impl Reception {
    /// Start a reception; the initial status is always `InProgress`.
    pub fn open(pvz_id: PvzId, now: DateTime<Utc>) -> Self {
        Self {
            id: ReceptionId::new(),
            date_time: now,
            pvz_id,
            status: ReceptionStatus::InProgress,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == ReceptionStatus::InProgress
    }
}

/// Item logged during a reception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub date_time: DateTime<Utc>,
    pub product_type: ProductType,
    pub reception_id: ReceptionId,
}

impl Product {
    pub fn new(reception_id: ReceptionId, product_type: ProductType, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            date_time: now,
            product_type,
            reception_id,
        }
    }
}

/// Listing row: a pickup point with its receptions and their products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvzWithReceptions {
    pub pvz: Pvz,
    pub receptions: Vec<ReceptionWithProducts>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceptionWithProducts {
    pub reception: Reception,
    pub products: Vec<Product>,
}

/// Optional inclusive bounds on reception timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| instant >= start)
            && self.end.map_or(true, |end| instant <= end)
    }
}

/// Validated parameters for the pickup-point listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PvzListFilter {
    pub date_range: DateRange,
    pub offset: u64,
    pub limit: u64,
}

impl PvzListFilter {
    /// Validate listing parameters.
    ///
    /// # Errors
    /// * `InvalidDateRange` - Both bounds given and `start > end`
    /// * `InvalidPagination` - `offset < 0` or `limit <= 0`
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<Self, PvzError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(PvzError::InvalidDateRange { start, end });
            }
        }

        if offset < 0 || limit <= 0 {
            return Err(PvzError::InvalidPagination { offset, limit });
        }

        Ok(Self {
            date_range: DateRange { start, end },
            offset: offset as u64,
            limit: limit as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_city_parse_canonical_and_alias() {
        assert_eq!(City::parse("Москва"), Ok(City::Moscow));
        assert_eq!(City::parse("moscow"), Ok(City::Moscow));
        assert_eq!(City::parse("Saint Petersburg"), Ok(City::SaintPetersburg));
        assert_eq!(City::parse("Казань"), Ok(City::Kazan));
        assert_eq!(
            City::parse("Новосибирск"),
            Err(CityError::Unknown("Новосибирск".to_string()))
        );
        assert!(City::parse("").is_err());
    }

    #[test]
    fn test_product_type_parse() {
        assert_eq!(ProductType::parse("electronics"), Ok(ProductType::Electronics));
        assert_eq!(ProductType::parse("одежда"), Ok(ProductType::Clothes));
        assert_eq!(ProductType::parse("SHOES"), Ok(ProductType::Shoes));
        assert!(ProductType::parse("furniture").is_err());
    }

    #[test]
    fn test_reception_status_round_trip() {
        for status in [ReceptionStatus::InProgress, ReceptionStatus::Closed] {
            assert_eq!(ReceptionStatus::parse(status.as_str()), Ok(status));
        }
        assert!(ReceptionStatus::parse("open").is_err());
    }

    #[test]
    fn test_reception_opens_in_progress() {
        let reception = Reception::open(PvzId::new(), Utc::now());
        assert_eq!(reception.status, ReceptionStatus::InProgress);
        assert!(reception.is_open());
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let now = Utc::now();
        let range = DateRange {
            start: Some(now - Duration::hours(1)),
            end: Some(now),
        };

        assert!(range.contains(now));
        assert!(range.contains(now - Duration::hours(1)));
        assert!(!range.contains(now + Duration::seconds(1)));
        assert!(DateRange::default().contains(now));
        assert!(DateRange::default().is_unbounded());
    }

    #[test]
    fn test_list_filter_validation() {
        let now = Utc::now();

        assert!(matches!(
            PvzListFilter::new(Some(now), Some(now - Duration::days(1)), 0, 10),
            Err(PvzError::InvalidDateRange { .. })
        ));
        assert!(matches!(
            PvzListFilter::new(None, None, -1, 10),
            Err(PvzError::InvalidPagination { .. })
        ));
        assert!(matches!(
            PvzListFilter::new(None, None, 0, 0),
            Err(PvzError::InvalidPagination { .. })
        ));

        let filter = PvzListFilter::new(Some(now), None, 20, 10).unwrap();
        assert_eq!(filter.offset, 20);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.date_range.start, Some(now));
    }
}
