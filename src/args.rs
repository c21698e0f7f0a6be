use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "page-digest")]
#[command(about = "Fetch a web page and print its extracted summary as JSON")]
#[command(version)]
pub struct Args {
    /// URL to scrape (a bare domain such as example.com is accepted)
    pub url: String,

    /// Print the bounded, storage-ready record instead of the full extraction
    #[arg(short, long)]
    pub refine: bool,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Override the User-Agent header
    #[arg(long, env = "PAGE_DIGEST_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}
