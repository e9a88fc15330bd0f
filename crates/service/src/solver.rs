//! Amount solver
//!
//! Answers "how much of the source asset must be swapped to net at least
//! `target` of the settlement token", using the swap router as the only
//! oracle. Every iteration is one quote call, so the search is bounded by
//! a hard iteration ceiling and aborts on the first service failure.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crossbuy_types::{
	to_base_units, Asset, IbcDenom, PriceFeed, PriceFeedError, RouteRequest, SolveStrategy,
	SolverError, SolverResult, SwapRouter,
};

const TRACING_TARGET: &str = "crossbuy::solver";

/// Solver tuning; the defaults match the production search space
#[derive(Debug, Clone)]
pub struct SolverConfig {
	pub strategy: SolveStrategy,
	/// The asset the search nets, on its home chain
	pub settlement: Asset,
	/// Hard ceiling on quote calls per search
	pub max_iterations: u32,
	/// Search precision in display units; also the refinement step
	pub precision: f64,
	pub low_bound: f64,
	pub high_bound: f64,
	/// Inflation applied to the price-seeded starting guess (0.01 = 1%)
	pub seed_safety_margin: f64,
}

impl Default for SolverConfig {
	fn default() -> Self {
		Self {
			strategy: SolveStrategy::Bisection,
			settlement: Asset::stars(),
			max_iterations: 96,
			precision: 0.001,
			low_bound: 0.000_001,
			high_bound: 9_999_999.999_999,
			seed_safety_margin: 0.01,
		}
	}
}

/// Iterative source-amount search against the router.
///
/// A new `solve` call supersedes any in-flight one: the older search stops
/// at its next iteration and resolves to [`SolverError::Superseded`]
/// without publishing a result.
#[derive(Debug)]
pub struct AmountSolver {
	router: Arc<dyn SwapRouter>,
	prices: Arc<dyn PriceFeed>,
	config: SolverConfig,
	generation: AtomicU64,
}

impl AmountSolver {
	pub fn new(
		router: Arc<dyn SwapRouter>,
		prices: Arc<dyn PriceFeed>,
		config: SolverConfig,
	) -> Self {
		Self {
			router,
			prices,
			config,
			generation: AtomicU64::new(0),
		}
	}

	/// Find a source amount whose quoted output is at least `target`
	/// display units of the settlement asset.
	///
	/// Zero targets trivially solve to zero; the identity asset solves to
	/// `target`. Neither touches the network.
	pub async fn solve(&self, target: f64, source: &Asset) -> SolverResult<f64> {
		if target == 0.0 {
			return Ok(0.0);
		}
		if !(target > 0.0) {
			return Err(SolverError::InvalidTarget { value: target });
		}
		if source.denom == self.config.settlement.denom {
			return Ok(target);
		}

		let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
		let mut search = Search {
			solver: self,
			source,
			generation,
			calls: 0,
		};

		let result = match self.config.strategy {
			SolveStrategy::Bisection => search.bisect(target).await,
			SolveStrategy::PriceSeeded => search.price_seeded(target).await,
		};

		if let Ok(amount) = &result {
			debug!(
				target: TRACING_TARGET,
				target_out = target,
				source = %source.denom,
				amount_in = amount,
				quote_calls = search.calls,
				"solved source amount"
			);
		}

		result
	}
}

/// One in-flight search; tracks the quote budget and staleness
struct Search<'a> {
	solver: &'a AmountSolver,
	source: &'a Asset,
	generation: u64,
	calls: u32,
}

impl Search<'_> {
	/// One quote call, charged against the iteration ceiling.
	async fn quote(&mut self, amount: f64) -> SolverResult<f64> {
		if self.solver.generation.load(Ordering::SeqCst) != self.generation {
			return Err(SolverError::Superseded);
		}
		if self.calls >= self.solver.config.max_iterations {
			return Err(SolverError::NoConvergence {
				iterations: self.calls,
			});
		}
		self.calls += 1;

		let config = &self.solver.config;
		let request = RouteRequest::new(
			to_base_units(amount, config.settlement.decimals),
			IbcDenom::new(&self.source.denom, &self.source.chain_id),
			IbcDenom::new(&config.settlement.denom, &config.settlement.chain_id),
		);

		let route = self.solver.router.route(&request).await?;
		Ok(route.amount_out_display(config.settlement.decimals)?)
	}

	/// Bisect between wide bounds, then refine linearly from the lower
	/// bound until the quote clears the target.
	async fn bisect(&mut self, target: f64) -> SolverResult<f64> {
		let config = &self.solver.config;
		let step = config.precision;
		let mut low = config.low_bound;
		let mut high = config.high_bound;

		while low <= high {
			let mid = (low + high) / 2.0;
			let out = self.quote(mid).await?;

			if out == target {
				// exact hit, nothing left to narrow
				return Ok(mid);
			} else if out < target {
				low = mid + step;
			} else {
				high = mid - step;
			}
		}

		self.refine(target, low).await
	}

	/// Seed from the price ratio between the two assets, then refine.
	async fn price_seeded(&mut self, target: f64) -> SolverResult<f64> {
		let config = &self.solver.config;

		let source_id = self.feed_id(self.source)?;
		let dest_id = self.feed_id(&config.settlement)?;

		let source_price = self.solver.prices.price(&source_id).await?;
		let dest_price = self.solver.prices.price(&dest_id).await?;
		if !(source_price > 0.0) || !(dest_price > 0.0) {
			return Err(SolverError::PriceFeed(PriceFeedError::MissingPrice {
				id: source_id,
			}));
		}

		// source units per settlement unit
		let ratio = dest_price / source_price;
		let seed = target * ratio * (1.0 + config.seed_safety_margin);
		// one cent of settlement value, floored at the precision step
		let step = (ratio / 100.0).max(config.precision);

		debug!(
			target: TRACING_TARGET,
			seed,
			step,
			source_price,
			dest_price,
			"price-seeded search start"
		);

		self.refine_with_step(target, seed, step).await
	}

	async fn refine(&mut self, target: f64, from: f64) -> SolverResult<f64> {
		let step = self.solver.config.precision;
		self.refine_with_step(target, from, step).await
	}

	/// Step upward until the quoted output meets the target.
	async fn refine_with_step(&mut self, target: f64, from: f64, step: f64) -> SolverResult<f64> {
		let mut candidate = from;
		loop {
			let out = self.quote(candidate).await?;
			if out >= target {
				return Ok(candidate);
			}
			candidate += step;
		}
	}

	fn feed_id(&self, asset: &Asset) -> SolverResult<String> {
		asset
			.coingecko_id
			.clone()
			.ok_or_else(|| SolverError::UnknownAsset {
				denom: asset.denom.clone(),
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use crossbuy_types::{
		from_base_units, MessagePlan, MessagesRequest, PriceFeedResult, RouterError, RouterResult,
		SwapRoute,
	};
	use std::collections::HashMap;
	use std::sync::atomic::AtomicUsize;
	use std::time::Duration;

	/// Router backed by a quote function over display amounts
	struct FnRouter<F> {
		quote_fn: F,
		calls: AtomicUsize,
		delay: Duration,
	}

	impl<F> FnRouter<F>
	where
		F: Fn(f64) -> f64 + Send + Sync,
	{
		fn new(quote_fn: F) -> Self {
			Self {
				quote_fn,
				calls: AtomicUsize::new(0),
				delay: Duration::ZERO,
			}
		}

		fn with_delay(quote_fn: F, delay: Duration) -> Self {
			Self {
				quote_fn,
				calls: AtomicUsize::new(0),
				delay,
			}
		}

		fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}

	impl<F> std::fmt::Debug for FnRouter<F> {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("FnRouter").finish()
		}
	}

	#[async_trait]
	impl<F> SwapRouter for FnRouter<F>
	where
		F: Fn(f64) -> f64 + Send + Sync,
	{
		async fn route(&self, request: &RouteRequest) -> RouterResult<SwapRoute> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			if !self.delay.is_zero() {
				tokio::time::sleep(self.delay).await;
			}

			let amount_in: u128 = request.amount_in.parse().unwrap();
			let out = (self.quote_fn)(from_base_units(amount_in, 6));

			Ok(SwapRoute {
				source_asset: request.source_asset.clone(),
				dest_asset: request.dest_asset.clone(),
				amount_in: request.amount_in.clone(),
				user_swap: serde_json::Value::Null,
				user_swap_amount_out: to_base_units(out, 6).to_string(),
				fee_swap: None,
				pre_swap_hops: vec![],
				post_swap_hops: vec![],
				chain_ids: vec![
					request.source_asset.chain_id.clone(),
					request.dest_asset.chain_id.clone(),
				],
			})
		}

		async fn messages(&self, _request: &MessagesRequest) -> RouterResult<MessagePlan> {
			Err(RouterError::InvalidResponse {
				reason: "not a message builder".to_string(),
			})
		}
	}

	/// Router that always fails
	#[derive(Debug)]
	struct FailingRouter;

	#[async_trait]
	impl SwapRouter for FailingRouter {
		async fn route(&self, _request: &RouteRequest) -> RouterResult<SwapRoute> {
			Err(RouterError::Status {
				code: 502,
				body: "bad gateway".to_string(),
			})
		}

		async fn messages(&self, _request: &MessagesRequest) -> RouterResult<MessagePlan> {
			Err(RouterError::Status {
				code: 502,
				body: "bad gateway".to_string(),
			})
		}
	}

	/// Static price table
	#[derive(Debug, Default)]
	struct TableFeed {
		prices: HashMap<String, f64>,
	}

	#[async_trait]
	impl PriceFeed for TableFeed {
		async fn price(&self, id: &str) -> PriceFeedResult<f64> {
			self.prices
				.get(id)
				.copied()
				.ok_or_else(|| PriceFeedError::MissingPrice { id: id.to_string() })
		}
	}

	fn solver_with<R: SwapRouter + 'static>(router: Arc<R>, config: SolverConfig) -> AmountSolver {
		AmountSolver::new(router, Arc::new(TableFeed::default()), config)
	}

	#[tokio::test]
	async fn test_identity_asset_solves_without_quotes() {
		let router = Arc::new(FnRouter::new(|x| x));
		let solver = solver_with(router.clone(), SolverConfig::default());

		let amount = solver.solve(80_000.0, &Asset::stars()).await.unwrap();

		assert_eq!(amount, 80_000.0);
		assert_eq!(router.calls(), 0);
	}

	#[tokio::test]
	async fn test_zero_target_is_trivial() {
		let router = Arc::new(FnRouter::new(|x| x));
		let solver = solver_with(router.clone(), SolverConfig::default());

		assert_eq!(solver.solve(0.0, &Asset::osmo()).await.unwrap(), 0.0);
		assert_eq!(router.calls(), 0);
	}

	#[tokio::test]
	async fn test_negative_target_is_rejected() {
		let router = Arc::new(FnRouter::new(|x| x));
		let solver = solver_with(router, SolverConfig::default());

		assert!(matches!(
			solver.solve(-5.0, &Asset::osmo()).await,
			Err(SolverError::InvalidTarget { .. })
		));
	}

	#[tokio::test]
	async fn test_bisection_converges_on_monotonic_quote() {
		// a route losing 5% to fees: f(x) = 0.95x, target 80000
		let router = Arc::new(FnRouter::new(|x| x * 0.95));
		let solver = solver_with(router.clone(), SolverConfig::default());

		let amount = solver.solve(80_000.0, &Asset::osmo()).await.unwrap();

		// exact crossover is 80000 / 0.95 = 84210.5263...
		assert!(
			(amount - 84_210.526).abs() < 0.01,
			"unexpected amount {amount}"
		);
		// the invariant: the quoted output never undershoots the target
		assert!(amount * 0.95 >= 80_000.0 - 1e-6);
		assert!(router.calls() <= 96);
	}

	#[tokio::test]
	async fn test_bisection_exact_match_is_success() {
		// the router quotes the target back no matter the input, so the very
		// first midpoint is an exact hit and the search stops there
		let router = Arc::new(FnRouter::new(|_| 80_000.0));
		let solver = solver_with(router.clone(), SolverConfig::default());

		let amount = solver.solve(80_000.0, &Asset::osmo()).await.unwrap();

		assert!(amount > 0.0);
		assert_eq!(router.calls(), 1);
	}

	#[tokio::test]
	async fn test_unreachable_target_raises_no_convergence() {
		// output is capped far below the target, the search can never finish
		let router = Arc::new(FnRouter::new(|_| 10.0));
		let solver = solver_with(router.clone(), SolverConfig::default());

		let result = solver.solve(80_000.0, &Asset::osmo()).await;

		assert!(matches!(result, Err(SolverError::NoConvergence { .. })));
		assert!(router.calls() <= 96);
	}

	#[tokio::test]
	async fn test_router_failure_aborts_the_search() {
		let solver = solver_with(Arc::new(FailingRouter), SolverConfig::default());

		let result = solver.solve(80_000.0, &Asset::osmo()).await;

		assert!(matches!(result, Err(SolverError::QuoteService(_))));
	}

	#[tokio::test]
	async fn test_newer_solve_supersedes_in_flight_search() {
		let router = Arc::new(FnRouter::with_delay(
			|x| x * 0.95,
			Duration::from_millis(20),
		));
		let solver = Arc::new(solver_with(router, SolverConfig::default()));

		let slow = {
			let solver = solver.clone();
			tokio::spawn(async move { solver.solve(80_000.0, &Asset::osmo()).await })
		};

		// let the first search issue a few quotes, then start a new one
		tokio::time::sleep(Duration::from_millis(50)).await;
		let fresh = solver.solve(70_000.0, &Asset::osmo()).await.unwrap();
		assert!(fresh * 0.95 >= 70_000.0 - 1e-6);

		assert!(matches!(
			slow.await.unwrap(),
			Err(SolverError::Superseded)
		));
	}

	#[tokio::test]
	async fn test_price_seeded_lands_above_target_in_one_call() {
		let router = Arc::new(FnRouter::new(|x| x * 10.0));
		let prices = TableFeed {
			prices: HashMap::from([
				("osmosis".to_string(), 0.5),
				("stargaze".to_string(), 0.05),
			]),
		};
		let config = SolverConfig {
			strategy: SolveStrategy::PriceSeeded,
			..SolverConfig::default()
		};
		let solver = AmountSolver::new(router.clone(), Arc::new(prices), config);

		let amount = solver.solve(1_000.0, &Asset::osmo()).await.unwrap();

		// ratio 0.1, 1% margin: seed = 1000 * 0.1 * 1.01 = 101
		assert!((amount - 101.0).abs() < 1e-9);
		assert_eq!(router.calls(), 1);
	}

	#[tokio::test]
	async fn test_price_seeded_steps_up_when_seed_undershoots() {
		// quotes lose 40%, so the 1%-inflated seed is not enough
		let router = Arc::new(FnRouter::new(|x| x * 0.6));
		let prices = TableFeed {
			prices: HashMap::from([
				("osmosis".to_string(), 0.05),
				("stargaze".to_string(), 0.05),
			]),
		};
		let config = SolverConfig {
			strategy: SolveStrategy::PriceSeeded,
			max_iterations: 20_000,
			..SolverConfig::default()
		};
		let solver = AmountSolver::new(router.clone(), Arc::new(prices), config);

		let amount = solver.solve(10.0, &Asset::osmo()).await.unwrap();

		assert!(amount * 0.6 >= 10.0 - 1e-5);
		assert!(router.calls() > 1);
	}

	#[tokio::test]
	async fn test_price_seeded_requires_feed_ids() {
		let router = Arc::new(FnRouter::new(|x| x));
		let config = SolverConfig {
			strategy: SolveStrategy::PriceSeeded,
			..SolverConfig::default()
		};
		let solver = AmountSolver::new(router, Arc::new(TableFeed::default()), config);

		let mut unpriced = Asset::osmo();
		unpriced.coingecko_id = None;

		assert!(matches!(
			solver.solve(10.0, &unpriced).await,
			Err(SolverError::UnknownAsset { .. })
		));
	}
}
