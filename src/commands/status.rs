use crate::error::Result;
use crate::output::{self, Format};
use crate::progress::ProgressReport;
use crate::store::RoadmapStore;

pub fn run(store: &RoadmapStore, format: Format) -> Result<()> {
    let report = ProgressReport::build(&store.load());
    output::print_report(&report, format)
}
