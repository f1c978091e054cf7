//! glr - create GitLab releases with uploaded assets.

use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let exit_code = glr::cli::run().await;
    process::exit(exit_code);
}
