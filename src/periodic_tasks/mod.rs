mod monitoring;
mod runner;

pub(crate) use monitoring::MonitoringTask;
