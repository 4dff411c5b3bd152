use crate::cli::commands::ValidateArgs;
use crate::errors::CopilotError;
use crate::kql;

pub fn handle_validate(args: ValidateArgs) -> Result<(), CopilotError> {
    let result = kql::validate_syntax(&args.query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.valid {
        println!("{}", result.message.as_deref().unwrap_or("Query syntax appears valid"));
    } else {
        for error in &result.errors {
            println!("error: {}", error);
        }
    }

    Ok(())
}
