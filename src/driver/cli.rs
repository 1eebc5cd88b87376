//! CLI Argument Parsing
//!
//! CLIの引数解析

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::adapter::config::ConfigOverrides;

/// ファイルまたはディレクトリを IPFS ゲートウェイにアップロードする CLI
#[derive(Parser, Debug, Clone)]
#[command(name = "ipfs-upload")]
#[command(about = "Upload a file or directory to an IPFS HTTP API and print its CID", long_about = None)]
pub struct Args {
    /// File or directory to upload
    pub path: PathBuf,

    /// Your Infura project ID
    #[arg(long, env = "IPFS_UPLOAD_PROJECT_ID")]
    pub id: Option<String>,

    /// Your Infura project secret
    #[arg(long, env = "IPFS_UPLOAD_PROJECT_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// The API URL [default: https://ipfs.infura.io:5001]
    #[arg(long, env = "IPFS_UPLOAD_API_URL")]
    pub url: Option<String>,

    /// Whether or not to pin the data [default: true]
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    pub pin: Option<bool>,

    /// Whether or not to print added items while uploading [default: true]
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    pub progress: Option<bool>,

    /// Include hidden files when uploading a directory
    #[arg(long)]
    pub hidden: bool,

    /// Config file path
    #[arg(short, long, env = "IPFS_UPLOAD_CONFIG")]
    pub config: Option<String>,
}

impl Args {
    /// フラグと環境変数の値を設定の上書きとして取り出す
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            project_id: self.id.clone(),
            project_secret: self.secret.clone(),
            api_url: self.url.clone(),
            pin: self.pin,
            progress: self.progress,
            hidden: self.hidden,
            config_path: self.config.clone(),
        }
    }
}
