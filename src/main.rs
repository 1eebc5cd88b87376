//! ipfs-upload - IPFS Uploader
//!
//! ファイルまたはディレクトリを IPFS ゲートウェイにアップロードし、CID を表示する

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use ipfs_upload::adapter::config::Config;
use ipfs_upload::driver::workflow::{exit_code, EXIT_FAILURE};
use ipfs_upload::driver::{Args, UploadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    // Credentials are checked before anything touches the network
    let config = match Config::resolve(&args.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let workflow = UploadWorkflow::new(config);

    let start = Instant::now();
    let code = match workflow.execute(&args).await {
        Ok(result) => {
            println!("{}", result.content_id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    };
    eprintln!("{:?}", start.elapsed());

    code
}
