//! Runs controller [`Command`]s against an [`AdminApi`].

use crate::api::AdminApi;
use crate::controller::{Command, Method, Mutation, Outcome, TableController};

/// Execute one command. `SignIn` is not an API call and yields `None`.
pub async fn execute(api: &dyn AdminApi, command: Command) -> Option<Outcome> {
    match command {
        Command::Fetch { generation, path, query } => {
            let result = api.list(&path, &query).await;
            Some(Outcome::Fetched { generation, result })
        }
        Command::FetchEmployees => Some(Outcome::Employees(api.fetch_employees().await)),
        Command::Mutate(Mutation {
            kind,
            dialog,
            method,
            path,
            body,
        }) => {
            let body = body.unwrap_or(serde_json::Value::Null);
            let result = match method {
                Method::Post => api.create(&path, body).await,
                Method::Put => api.update(&path, body).await,
                Method::Delete => api.delete(&path).await,
            };
            Some(Outcome::Mutated { kind, dialog, result })
        }
        Command::Upload { dialog, file } => {
            let result = api.upload_file(&file).await;
            Some(Outcome::Uploaded { dialog, result })
        }
        Command::SignIn => None,
    }
}

/// Run `commands` and every follow-up to completion, one at a time.
///
/// Returns the commands that need the user (sign-in redirects).
pub async fn drive(controller: &mut TableController, api: &dyn AdminApi, commands: Vec<Command>) -> Vec<Command> {
    let mut pending = std::collections::VecDeque::from(commands);
    let mut unhandled = Vec::new();

    while let Some(command) = pending.pop_front() {
        match execute(api, command.clone()).await {
            Some(outcome) => pending.extend(controller.handle_outcome(outcome)),
            None => unhandled.push(command),
        }
    }
    unhandled
}
