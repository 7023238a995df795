use harvest_interfaces::ExecPayload;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol, Val, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Task {
    pub creator: Address,
    pub exec_target: Address,
    pub exec_function: Symbol,
    pub resolver: Address,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    NextId,
    Task(u64),
    UserTasks(Address),
}

/// Keeper network stand-in. `exec` plays the off-chain executor: it asks the
/// task's resolver whether to run and relays the returned payload.
#[contract]
pub struct MockAutomation;

#[contractimpl]
impl MockAutomation {
    pub fn create_task(
        env: Env,
        creator: Address,
        exec_target: Address,
        exec_function: Symbol,
        resolver: Address,
    ) -> u64 {
        creator.require_auth();

        let task_id: u64 = env.storage().instance().get(&DataKey::NextId).unwrap_or(0);
        env.storage().instance().set(&DataKey::NextId, &(task_id + 1));
        env.storage().persistent().set(
            &DataKey::Task(task_id),
            &Task {
                creator: creator.clone(),
                exec_target,
                exec_function,
                resolver,
            },
        );

        let mut ids = Self::task_ids_by_user(env.clone(), creator.clone());
        ids.push_back(task_id);
        env.storage().persistent().set(&DataKey::UserTasks(creator), &ids);
        task_id
    }

    pub fn cancel_task(env: Env, creator: Address, task_id: u64) {
        creator.require_auth();
        let task = Self::task(env.clone(), task_id);
        assert!(task.creator == creator, "not task creator");

        env.storage().persistent().remove(&DataKey::Task(task_id));
        let mut ids = Self::task_ids_by_user(env.clone(), creator.clone());
        if let Some(index) = ids.first_index_of(task_id) {
            ids.remove(index);
        }
        env.storage().persistent().set(&DataKey::UserTasks(creator), &ids);
    }

    pub fn task(env: Env, task_id: u64) -> Task {
        env.storage()
            .persistent()
            .get(&DataKey::Task(task_id))
            .expect("unknown task")
    }

    pub fn task_ids_by_user(env: Env, user: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::UserTasks(user))
            .unwrap_or_else(|| Vec::new(&env))
    }

    /// Runs the task if its resolver allows it. Returns whether it ran.
    pub fn exec(env: Env, task_id: u64) -> bool {
        let task = Self::task(env.clone(), task_id);

        let (can_exec, payload): (bool, ExecPayload) = env.invoke_contract(
            &task.resolver,
            &Symbol::new(&env, "checker"),
            Vec::new(&env),
        );
        if !can_exec {
            return false;
        }
        assert!(payload.target == task.exec_target, "payload target mismatch");
        assert!(payload.function == task.exec_function, "payload function mismatch");

        env.invoke_contract::<Val>(&payload.target, &payload.function, payload.args);
        true
    }
}
