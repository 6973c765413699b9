// Ingestion: upload → parse → analyze, plus the mapping from the external
// parsed schema into the internal CV aggregate. Stages are strictly
// sequential; mapping happens only after all three succeed.

pub mod handlers;
pub mod mapping;
pub mod pipeline;
