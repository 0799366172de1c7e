//! Entry point for the Gantry planner TUI.

use gantry_tui::{App, TuiResult};

#[tokio::main]
async fn main() -> TuiResult<()> {
    let mut app = App::new(None).await?;
    app.run().await
}
