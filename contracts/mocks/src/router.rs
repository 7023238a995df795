use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, Vec};

/// Fixed-point scale of router prices (units of `token_out` per `token_in`).
pub const PRICE_SCALE: i128 = 1_000_000_000;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Price(Address, Address),
    /// Basis points shaved off executed output relative to the quote.
    ExecutionSlippage,
}

/// Router that trades at prices set by the test. It must hold enough of
/// every output token to pay out.
#[contract]
pub struct MockSwapRouter;

#[contractimpl]
impl MockSwapRouter {
    pub fn set_price(env: Env, token_in: Address, token_out: Address, price: i128) {
        assert!(price > 0, "price must be positive");
        env.storage()
            .instance()
            .set(&DataKey::Price(token_in, token_out), &price);
    }

    pub fn set_execution_slippage(env: Env, bps: i128) {
        env.storage().instance().set(&DataKey::ExecutionSlippage, &bps);
    }

    pub fn router_get_amounts_out(env: Env, amount_in: i128, path: Vec<Address>) -> Vec<i128> {
        assert!(path.len() >= 2, "invalid path");
        let mut amounts = Vec::new(&env);
        amounts.push_back(amount_in);

        let mut amount = amount_in;
        for hop in 0..path.len() - 1 {
            let price = Self::price(&env, &path.get_unchecked(hop), &path.get_unchecked(hop + 1));
            amount = amount * price / PRICE_SCALE;
            amounts.push_back(amount);
        }
        amounts
    }

    pub fn swap_exact_tokens_for_tokens(
        env: Env,
        amount_in: i128,
        amount_out_min: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Vec<i128> {
        to.require_auth();
        assert!(env.ledger().timestamp() <= deadline, "deadline expired");

        let mut amounts = Self::router_get_amounts_out(env.clone(), amount_in, path.clone());
        let last = amounts.len() - 1;
        let slippage: i128 = env
            .storage()
            .instance()
            .get(&DataKey::ExecutionSlippage)
            .unwrap_or(0);
        let amount_out = amounts.get_unchecked(last) * (10_000 - slippage) / 10_000;
        amounts.set(last, amount_out);
        assert!(amount_out >= amount_out_min, "insufficient output amount");

        Self::settle(&env, &path, &to, amount_in, amount_out);
        amounts
    }

    fn settle(env: &Env, path: &Vec<Address>, to: &Address, amount_in: i128, amount_out: i128) {
        let router = env.current_contract_address();
        token::Client::new(env, &path.get_unchecked(0)).transfer(to, &router, &amount_in);
        token::Client::new(env, &path.get_unchecked(path.len() - 1)).transfer(&router, to, &amount_out);
    }

    fn price(env: &Env, token_in: &Address, token_out: &Address) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::Price(token_in.clone(), token_out.clone()))
            .expect("no price for pair")
    }
}
