mod company;
mod firm;
mod ids;
mod odds;
mod results;
mod stage;

pub use company::{Company, CompanyState};
pub use firm::{Firm, PortfolioBreakdown, PortfolioCensus};
pub use ids::StageId;
pub use odds::{ExitDistribution, PROBABILITY_TOLERANCE, TransitionOdds, TransitionOutcome};
pub use results::{
    HISTOGRAM_BIN_WIDTH, HISTOGRAM_UPPER_BOUND, Histogram, MonteCarloResult, PercentileTable,
    RunOverview, median,
};
pub use stage::StageTable;
