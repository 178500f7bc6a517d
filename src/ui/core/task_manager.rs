use super::actions::{Action, Screen};
use crate::api::AdminApi;
use crate::controller::Command;
use crate::dispatcher;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs controller commands in the background.
///
/// Each command becomes one tokio task; its outcome comes back as
/// [`Action::CommandFinished`] on the channel returned by [`TaskManager::new`].
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
    api: Arc<dyn AdminApi>,
}

impl TaskManager {
    pub fn new(api: Arc<dyn AdminApi>) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
                api,
            },
            rx,
        )
    }

    /// Spawn one API call for `screen`
    pub fn spawn_command(&mut self, screen: Screen, command: Command) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let description = describe(screen, &command);
        let action_sender = self.action_sender.clone();
        let api = Arc::clone(&self.api);

        let handle = tokio::spawn(async move {
            if let Some(outcome) = dispatcher::execute(api.as_ref(), command).await {
                let _ = action_sender.send(Action::CommandFinished { screen, outcome });
            }
        });

        self.tasks.insert(
            task_id,
            BackgroundTask {
                id: task_id,
                handle,
                description,
                started_at: std::time::Instant::now(),
            },
        );
        task_id
    }

    /// Drop finished tasks and return their descriptions
    pub fn cleanup_finished_tasks(&mut self) -> Vec<(TaskId, String)> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        finished
            .into_iter()
            .filter_map(|id| self.tasks.remove(&id).map(|task| (id, task.description)))
            .collect()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}

fn describe(screen: Screen, command: &Command) -> String {
    match command {
        Command::Fetch { generation, .. } => format!("{}: fetch #{}", screen.key(), generation),
        Command::FetchEmployees => format!("{}: fetch employees", screen.key()),
        Command::Mutate(mutation) => format!("{}: {:?} {}", screen.key(), mutation.kind, mutation.path),
        Command::Upload { file, .. } => format!("{}: upload {}", screen.key(), file.display()),
        Command::SignIn => format!("{}: sign in", screen.key()),
    }
}
