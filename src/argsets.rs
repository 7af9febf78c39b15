use std::path::PathBuf;

pub struct RunArgs {
    pub config: PathBuf,
    pub out: PathBuf,
}
