use std::path::Path;

use anyhow::Result;
use datascience::logging;
use datascience::scaffold::{TEMPLATE_FILES, generate};

fn main() -> Result<()> {
    logging::init_console("info")?;
    generate(Path::new("."), TEMPLATE_FILES)?;
    Ok(())
}
