//! Printer adapters for sending ePOS-Print jobs
//!
//! A job is one SOAP document POSTed to the device's ePOS-Print service.
//! The request races against the configured timeout; whichever settles
//! first decides the outcome.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, IF_MODIFIED_SINCE};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::config::PrinterConfig;
use crate::epos::EposBuilder;
use crate::error::{PrintError, PrintResult};
use crate::response::PrintResponse;

const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// Disables intermediary caching of the POST
const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Raw HTTP reply from the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Trait for HTTP transports
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a SOAP document and return the raw reply
    async fn post(&self, url: &str, body: String) -> PrintResult<HttpReply>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &PrinterConfig) -> PrintResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: String) -> PrintResult<HttpReply> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, CONTENT_TYPE_XML)
            .header(IF_MODIFIED_SINCE, EPOCH_HTTP_DATE)
            .header("SOAPAction", r#""""#)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}

/// Why a job did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Device answered `success="false"` or omitted the attribute
    Rejected { code: Option<String> },
    /// No reply before the configured timeout
    Timeout,
    /// Non-200 reply
    HttpStatus(u16),
    /// Request could not be delivered
    Transport(String),
    /// 200 reply without a usable `response` element
    MalformedResponse(String),
    /// Job was cancelled by the caller
    Cancelled,
}

/// Final result of a print job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    Success,
    Failure(FailureReason),
}

impl PrintOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PrintOutcome::Success)
    }

    /// Value for the boolean completion callback, if the device gave a verdict
    pub fn verdict(&self) -> Option<bool> {
        match self {
            PrintOutcome::Success => Some(true),
            PrintOutcome::Failure(FailureReason::Rejected { .. }) => Some(false),
            PrintOutcome::Failure(_) => None,
        }
    }
}

impl From<PrintResult<PrintResponse>> for PrintOutcome {
    fn from(result: PrintResult<PrintResponse>) -> Self {
        match result {
            Ok(response) if response.is_success() => PrintOutcome::Success,
            Ok(response) => PrintOutcome::Failure(FailureReason::Rejected {
                code: response.code,
            }),
            Err(PrintError::Timeout(_)) => PrintOutcome::Failure(FailureReason::Timeout),
            Err(PrintError::HttpStatus(status)) => {
                PrintOutcome::Failure(FailureReason::HttpStatus(status))
            }
            Err(PrintError::MalformedResponse(msg)) => {
                PrintOutcome::Failure(FailureReason::MalformedResponse(msg))
            }
            Err(e) => PrintOutcome::Failure(FailureReason::Transport(e.to_string())),
        }
    }
}

/// Observable state of a [`PrintJob`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintStatus {
    Pending,
    Settled(PrintOutcome),
}

/// Handle to an in-flight print job
///
/// Resolves exactly once. Dropping the handle does not cancel the job.
#[derive(Debug)]
pub struct PrintJob {
    rx: oneshot::Receiver<PrintOutcome>,
    handle: JoinHandle<()>,
    settled: Option<PrintOutcome>,
}

impl PrintJob {
    /// Poll without waiting
    pub fn status(&mut self) -> PrintStatus {
        if let Some(outcome) = &self.settled {
            return PrintStatus::Settled(outcome.clone());
        }

        match self.rx.try_recv() {
            Ok(outcome) => {
                self.settled = Some(outcome.clone());
                PrintStatus::Settled(outcome)
            }
            Err(oneshot::error::TryRecvError::Empty) => PrintStatus::Pending,
            Err(oneshot::error::TryRecvError::Closed) => {
                let outcome = PrintOutcome::Failure(FailureReason::Cancelled);
                self.settled = Some(outcome.clone());
                PrintStatus::Settled(outcome)
            }
        }
    }

    /// Wait for the job to settle
    pub async fn outcome(self) -> PrintOutcome {
        if let Some(outcome) = self.settled {
            return outcome;
        }

        self.rx
            .await
            .unwrap_or(PrintOutcome::Failure(FailureReason::Cancelled))
    }

    /// Abort the in-flight request; the job settles as `Cancelled`
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

/// ePOS-Print network printer
///
/// The device address is derived once from the configuration. The printer
/// never reads back or clears a builder: every job sends a snapshot of the
/// fragments at call time.
#[derive(Debug)]
pub struct EposPrinter<T = HttpTransport> {
    address: Arc<str>,
    timeout: Duration,
    transport: Arc<T>,
}

impl<T> Clone for EposPrinter<T> {
    fn clone(&self) -> Self {
        Self {
            address: Arc::clone(&self.address),
            timeout: self.timeout,
            transport: Arc::clone(&self.transport),
        }
    }
}

impl EposPrinter<HttpTransport> {
    /// Create a printer using the reqwest transport
    pub fn new(config: &PrinterConfig) -> PrintResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport + 'static> EposPrinter<T> {
    /// Create a printer with a custom transport
    pub fn with_transport(config: &PrinterConfig, transport: T) -> Self {
        Self {
            address: config.device_address().into(),
            timeout: config.timeout,
            transport: Arc::new(transport),
        }
    }

    /// Service URL the jobs are posted to
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send the builder's fragments and wait for the device reply
    #[instrument(skip(self, builder), fields(addr = %self.address, fragments = builder.len()))]
    pub async fn send(&self, builder: &EposBuilder) -> PrintResult<PrintResponse> {
        deliver(
            self.transport.as_ref(),
            &self.address,
            self.timeout,
            builder.to_envelope(),
        )
        .await
    }

    /// Submit a job in the background on the current tokio runtime
    pub fn print(&self, builder: &EposBuilder) -> PrintResult<PrintJob> {
        let runtime = current_runtime()?;
        let document = builder.to_envelope();
        let transport = Arc::clone(&self.transport);
        let address = Arc::clone(&self.address);
        let timeout = self.timeout;
        let (tx, rx) = oneshot::channel();

        let handle = runtime.spawn(async move {
            let result = deliver(transport.as_ref(), &address, timeout, document).await;
            let outcome = PrintOutcome::from(result);
            match &outcome {
                PrintOutcome::Success => info!(addr = %address, "Print job succeeded"),
                PrintOutcome::Failure(reason) => {
                    warn!(addr = %address, reason = ?reason, "Print job failed")
                }
            }
            let _ = tx.send(outcome);
        });

        Ok(PrintJob {
            rx,
            handle,
            settled: None,
        })
    }

    /// Submit a job and report the device verdict through a callback
    ///
    /// `on_complete` runs at most once: with `true` on success, `false` when
    /// the device rejects the job. Timeouts, transport errors and malformed
    /// replies never invoke it.
    pub fn print_with<F>(
        &self,
        builder: &EposBuilder,
        on_complete: F,
    ) -> PrintResult<JoinHandle<()>>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let job = self.print(builder)?;
        Ok(current_runtime()?.spawn(async move {
            if let Some(verdict) = job.outcome().await.verdict() {
                on_complete(verdict);
            }
        }))
    }

    /// Query the device with an empty job
    #[instrument(skip(self), fields(addr = %self.address))]
    pub async fn is_online(&self) -> bool {
        match self.send(&EposBuilder::new()).await {
            Ok(_) => {
                info!("Printer online");
                true
            }
            Err(e) => {
                warn!(error = %e, "Printer offline");
                false
            }
        }
    }
}

fn current_runtime() -> PrintResult<Handle> {
    Handle::try_current().map_err(|e| PrintError::NoRuntime(e.to_string()))
}

async fn deliver<T: Transport + ?Sized>(
    transport: &T,
    address: &str,
    timeout: Duration,
    document: String,
) -> PrintResult<PrintResponse> {
    info!(bytes = document.len(), "Sending print job");

    let reply = tokio::time::timeout(timeout, transport.post(address, document))
        .await
        .map_err(|_| PrintError::Timeout(timeout.as_millis()))??;

    if reply.status != 200 {
        return Err(PrintError::HttpStatus(reply.status));
    }

    PrintResponse::parse(&reply.body)
}
