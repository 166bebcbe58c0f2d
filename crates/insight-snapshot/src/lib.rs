mod batch;
mod dashboard;
mod error;
mod model;
mod reader;
mod registry;
mod writer;

pub use dashboard::{
    AbsencePolicy, DashboardData, LatestSite, SiteHistory, SiteSeries, SummaryArtifact,
};
pub use error::{ReadError, SnapshotError};
pub use model::{Batch, Category, SiteSample, Summary};
pub use reader::{
    demo_data, fetch_dashboard, fetch_dashboard_with_timeout, load_dashboard_file, DashboardFeed,
    DEMO_SITE, READ_TIMEOUT,
};
pub use registry::{canonical_name, is_gg_site};
pub use writer::{SnapshotWriter, DETAIL_FILE, SUMMARY_FILE};
