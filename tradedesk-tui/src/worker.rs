//! Background worker thread — all backend calls run here.
//!
//! The worker owns the `TradingApi` object and handles one command at
//! a time; the render thread never blocks on the network. Fetch
//! commands echo their request id back so the app can drop responses
//! that were superseded while in flight.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tradedesk_core::api::{
    ApiError, BacktestOutcome, BacktestRequest, NewStrategy, NewTrade, ScreenOutcome,
    ScreenRequest, TradePatch, TradingApi,
};
use tradedesk_core::domain::{ScreenResult, Strategy, Trade};

use crate::app::RequestId;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchTrades { open_only: bool, req_id: RequestId },
    FetchScreens { req_id: RequestId },
    FetchStrategies { req_id: RequestId },
    CreateTrade(NewTrade),
    UpdateTrade { id: i64, patch: TradePatch },
    DeleteTrade { id: i64 },
    RunScreen(ScreenRequest),
    CreateStrategy(NewStrategy),
    RunBacktest(BacktestRequest),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Trades {
        req_id: RequestId,
        result: Result<Vec<Trade>, ApiError>,
    },
    Screens {
        req_id: RequestId,
        result: Result<Vec<ScreenResult>, ApiError>,
    },
    Strategies {
        req_id: RequestId,
        result: Result<Vec<Strategy>, ApiError>,
    },
    TradeSaved(Result<Trade, ApiError>),
    TradeDeleted {
        id: i64,
        result: Result<(), ApiError>,
    },
    ScreenFinished(Result<ScreenOutcome, ApiError>),
    StrategySaved(Result<Strategy, ApiError>),
    BacktestFinished(Result<BacktestOutcome, ApiError>),
}

/// Spawn the worker thread. It exits on `Shutdown` or when the
/// command channel closes.
pub fn spawn_worker(
    api: Box<dyn TradingApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("tradedesk-worker".into())
        .spawn(move || worker_loop(api, rx, tx))
        .expect("failed to spawn worker thread")
}

fn worker_loop(api: Box<dyn TradingApi>, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(api.as_ref(), cmd, &tx),
        }
    }
}

fn handle_command(api: &dyn TradingApi, cmd: WorkerCommand, tx: &Sender<WorkerResponse>) {
    match cmd {
        WorkerCommand::FetchTrades { open_only, req_id } => {
            let result = api.list_trades(open_only);
            log_failure(&result, "list trades");
            let _ = tx.send(WorkerResponse::Trades { req_id, result });
        }
        WorkerCommand::FetchScreens { req_id } => {
            let result = api.list_screens();
            log_failure(&result, "list screenings");
            let _ = tx.send(WorkerResponse::Screens { req_id, result });
        }
        WorkerCommand::FetchStrategies { req_id } => {
            let result = api.list_strategies();
            log_failure(&result, "list strategies");
            let _ = tx.send(WorkerResponse::Strategies { req_id, result });
        }
        WorkerCommand::CreateTrade(trade) => {
            let result = api.create_trade(&trade);
            log_failure(&result, "create trade");
            let _ = tx.send(WorkerResponse::TradeSaved(result));
        }
        WorkerCommand::UpdateTrade { id, patch } => {
            let result = api.update_trade(id, &patch);
            log_failure(&result, "update trade");
            let _ = tx.send(WorkerResponse::TradeSaved(result));
        }
        WorkerCommand::DeleteTrade { id } => {
            let result = api.delete_trade(id);
            log_failure(&result, "delete trade");
            let _ = tx.send(WorkerResponse::TradeDeleted { id, result });
        }
        WorkerCommand::RunScreen(request) => {
            let result = api.run_screen(&request);
            log_failure(&result, "run screening");
            let _ = tx.send(WorkerResponse::ScreenFinished(result));
        }
        WorkerCommand::CreateStrategy(strategy) => {
            let result = api.create_strategy(&strategy);
            log_failure(&result, "create strategy");
            let _ = tx.send(WorkerResponse::StrategySaved(result));
        }
        WorkerCommand::RunBacktest(request) => {
            let result = api.run_backtest(&request);
            log_failure(&result, "run backtest");
            let _ = tx.send(WorkerResponse::BacktestFinished(result));
        }
        WorkerCommand::Shutdown => {} // handled in the loop
    }
}

fn log_failure<T>(result: &Result<T, ApiError>, op: &str) {
    if let Err(err) = result {
        tracing::error!(error = %err, "{op} failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct EmptyApi;

    impl TradingApi for EmptyApi {
        fn list_trades(&self, _open_only: bool) -> Result<Vec<Trade>, ApiError> {
            Ok(Vec::new())
        }
        fn list_screens(&self) -> Result<Vec<ScreenResult>, ApiError> {
            Ok(Vec::new())
        }
        fn list_strategies(&self) -> Result<Vec<Strategy>, ApiError> {
            Ok(Vec::new())
        }
        fn create_trade(&self, _trade: &NewTrade) -> Result<Trade, ApiError> {
            Err(ApiError::Network("offline".into()))
        }
        fn update_trade(&self, _id: i64, _patch: &TradePatch) -> Result<Trade, ApiError> {
            Err(ApiError::Network("offline".into()))
        }
        fn delete_trade(&self, _id: i64) -> Result<(), ApiError> {
            Ok(())
        }
        fn run_screen(&self, _request: &ScreenRequest) -> Result<ScreenOutcome, ApiError> {
            Err(ApiError::Network("offline".into()))
        }
        fn create_strategy(&self, _strategy: &NewStrategy) -> Result<Strategy, ApiError> {
            Err(ApiError::Network("offline".into()))
        }
        fn run_backtest(&self, _request: &BacktestRequest) -> Result<BacktestOutcome, ApiError> {
            Err(ApiError::Network("offline".into()))
        }
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(Box::new(EmptyApi), cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn fetch_echoes_the_request_id() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let handle = spawn_worker(Box::new(EmptyApi), cmd_rx, resp_tx);
        cmd_tx
            .send(WorkerCommand::FetchTrades {
                open_only: true,
                req_id: 42,
            })
            .unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::Trades { req_id, result } => {
                assert_eq!(req_id, 42);
                assert!(result.unwrap().is_empty());
            }
            other => panic!("unexpected response: {other:?}"),
        }

        drop(cmd_tx); // closing the channel also stops the worker
        handle.join().unwrap();
    }
}
