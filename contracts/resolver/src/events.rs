use soroban_sdk::{contracttype, Address};

/// # Topics
/// - `SymbolShort("task_new")` once the task is registered
/// - `SymbolShort("task_end")` once it is cancelled
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaskEvent {
    pub task_id: u64,
    pub strategy: Address,
}
