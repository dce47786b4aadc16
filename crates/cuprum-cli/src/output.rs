use crate::cli::OutputFormat;
use crate::commands::CommandView;
use crate::error::CliError;

pub fn render(view: &CommandView, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&view.data)?
            } else {
                serde_json::to_string(&view.data)?
            };
            println!("{payload}");
        }
        OutputFormat::Text => {
            for line in &view.lines {
                println!("{line}");
            }
        }
    }

    Ok(())
}
