pub const DEFAULT_OUT: &str = "spritevisu";
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;
pub const DEFAULT_MAX_CLUSTER_SIZE: usize = 1000;

pub const READS_DB_NAME: &str = "cluster_id_reads.db";
pub const READS_DB_NAME_START_ONLY: &str = "cluster_id_reads-startonly.db";
