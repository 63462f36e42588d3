use serde::{Deserialize, Serialize};

/// One row of a frequency ranking: a distinct category value and how
/// many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: u64,
}

impl FrequencyEntry {
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Mean of a numeric column within one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
}

/// Sum of a numeric column within one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub group: String,
    pub total: i64,
}

/// What the cleaning step did to the numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub rows: usize,
    pub costs_parsed: usize,
    pub costs_missing: usize,
    pub votes_parsed: usize,
    pub votes_missing: usize,
}

impl CleaningSummary {
    /// Fraction of rows whose cost survived normalization (0.0 - 1.0).
    pub fn cost_coverage(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.costs_parsed as f64 / self.rows as f64
        }
    }
}

/// The seven derived result sets, each already ranked and truncated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub top_locations: Vec<FrequencyEntry>,
    pub top_cuisines: Vec<FrequencyEntry>,
    pub avg_cost_by_location: Vec<GroupMean>,
    pub top_voted: Vec<GroupTotal>,
    pub online_order: Vec<FrequencyEntry>,
    pub rest_types: Vec<FrequencyEntry>,
    pub book_table: Vec<FrequencyEntry>,
}

/// Output of a full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResult {
    pub insights: InsightSet,
    pub cleaning: CleaningSummary,
    pub processing_steps: Vec<String>,
    pub duration_ms: u64,
}

/// How a result set is meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Identifies one of the seven result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightKind {
    TopLocations,
    PopularCuisines,
    AverageCostByLocation,
    MostVoted,
    OnlineOrder,
    RestaurantTypes,
    TableBooking,
}

impl InsightKind {
    /// All kinds in display order.
    pub const ALL: [InsightKind; 7] = [
        InsightKind::TopLocations,
        InsightKind::PopularCuisines,
        InsightKind::AverageCostByLocation,
        InsightKind::MostVoted,
        InsightKind::OnlineOrder,
        InsightKind::RestaurantTypes,
        InsightKind::TableBooking,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TopLocations => "Top Restaurant Locations",
            Self::PopularCuisines => "Most Popular Cuisines",
            Self::AverageCostByLocation => "Average Cost for Two by Location",
            Self::MostVoted => "Most Popular Restaurants by Votes",
            Self::OnlineOrder => "Online Order Availability",
            Self::RestaurantTypes => "Restaurant Type Distribution",
            Self::TableBooking => "Table Booking Availability",
        }
    }

    pub fn chart(&self) -> ChartKind {
        match self {
            Self::OnlineOrder | Self::RestaurantTypes | Self::TableBooking => ChartKind::Pie,
            _ => ChartKind::Bar,
        }
    }
}
