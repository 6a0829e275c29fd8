//! Step-driven request/response wrapper around a [`BlockCode`].
//!
//! Models a hardware unit with a start/busy/done handshake without putting
//! any timing into the code itself:
//! - a request is accepted only while the unit is idle
//! - an encode acknowledgement appears exactly `encode_latency` steps later
//! - a decode acknowledgement appears `decode_latency` steps later, at most 12
//! - an acknowledgement is visible for exactly one step
//!
//! The result is computed when the request is accepted; the latency only
//! delays when it becomes visible.
//!
//! # Examples
//!
//! ```
//! use polar64::ecc::{Request, Response};
//! use polar64::{PolarCode, ScheduleConfig, ScheduledCodec};
//!
//! let mut unit = ScheduledCodec::new(PolarCode::new().unwrap(), ScheduleConfig::default()).unwrap();
//! unit.submit(Request::Encode(0x000042)).unwrap();
//! assert_eq!(unit.tick(), None);
//! assert!(matches!(unit.tick(), Some(Response::Encoded(_))));
//! assert!(unit.is_idle());
//! ```

use crate::cs::ecc::{BlockCode, DecodeResult};
use crate::cs::error::{Error, Result};
use log::{trace, warn};

/// Decode results must be visible within this many steps of acceptance
pub const MAX_DECODE_LATENCY: u32 = 12;

/// Historical encode acknowledgement delay
pub const DEFAULT_ENCODE_LATENCY: u32 = 2;

/// Work handed to the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<M, B> {
    Encode(M),
    Decode(B),
}

/// Acknowledgement emitted by the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response<M, B> {
    Encoded(B),
    Decoded(DecodeResult<M>),
}

/// Latency contract for [`ScheduledCodec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Steps from acceptance to the encode acknowledgement
    pub encode_latency: u32,
    /// Steps from acceptance to the decode acknowledgement
    pub decode_latency: u32,
}

impl ScheduleConfig {
    pub fn new() -> Self {
        Self {
            encode_latency: DEFAULT_ENCODE_LATENCY,
            decode_latency: MAX_DECODE_LATENCY,
        }
    }

    pub fn with_encode_latency(mut self, steps: u32) -> Self {
        self.encode_latency = steps;
        self
    }

    pub fn with_decode_latency(mut self, steps: u32) -> Self {
        self.decode_latency = steps;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.encode_latency == 0 {
            return Err(Error::invalid_input("encode latency must be at least 1 step"));
        }
        if self.decode_latency == 0 || self.decode_latency > MAX_DECODE_LATENCY {
            return Err(Error::invalid_input(format!(
                "decode latency must be between 1 and {} steps, got {}",
                MAX_DECODE_LATENCY, self.decode_latency
            )));
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
enum State<R> {
    Idle,
    Busy { remaining: u32, response: R },
}

pub type ResponseOf<C> = Response<<C as BlockCode>::Message, <C as BlockCode>::Block>;
pub type RequestOf<C> = Request<<C as BlockCode>::Message, <C as BlockCode>::Block>;

/// A [`BlockCode`] driven one step at a time.
///
/// State: `Idle -> Busy -> (acknowledge) -> Idle`.
#[derive(Debug)]
pub struct ScheduledCodec<C: BlockCode> {
    code: C,
    config: ScheduleConfig,
    state: State<ResponseOf<C>>,
    ack: Option<ResponseOf<C>>,
    steps: u64,
}

impl<C: BlockCode> ScheduledCodec<C> {
    pub fn new(code: C, config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            code,
            config,
            state: State::Idle,
            ack: None,
            steps: 0,
        })
    }

    pub fn code(&self) -> &C {
        &self.code
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Steps elapsed since construction
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }

    /// Acknowledgement visible during the current step, if any
    pub fn ack(&self) -> Option<&ResponseOf<C>> {
        self.ack.as_ref()
    }

    /// Accept a request. Refused with [`Error::Busy`] while one is in flight.
    pub fn submit(&mut self, request: RequestOf<C>) -> Result<()> {
        if self.is_busy() {
            warn!("request refused at step {}: unit busy", self.steps);
            return Err(Error::Busy);
        }

        let (remaining, response) = match request {
            Request::Encode(message) => (
                self.config.encode_latency,
                Response::Encoded(self.code.encode(message)),
            ),
            Request::Decode(block) => (
                self.config.decode_latency,
                Response::Decoded(self.code.decode(block)),
            ),
        };
        trace!("accepted {:?} at step {}", request, self.steps);
        self.state = State::Busy {
            remaining,
            response,
        };
        Ok(())
    }

    /// Advance one step, returning the acknowledgement raised on it.
    pub fn tick(&mut self) -> Option<ResponseOf<C>> {
        self.steps += 1;
        self.ack = None;

        let finished = match &mut self.state {
            State::Busy { remaining, .. } => {
                *remaining -= 1;
                *remaining == 0
            }
            State::Idle => false,
        };

        if finished {
            if let State::Busy { response, .. } = std::mem::replace(&mut self.state, State::Idle) {
                trace!("acknowledged at step {}", self.steps);
                self.ack = Some(response);
            }
        }
        self.ack
    }

    /// Submit and step until the acknowledgement, returning it with the
    /// number of steps taken.
    pub fn run(&mut self, request: RequestOf<C>) -> Result<(ResponseOf<C>, u32)> {
        self.submit(request)?;
        let mut taken = 0;
        loop {
            taken += 1;
            if let Some(response) = self.tick() {
                return Ok((response, taken));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ecc::polar::PolarCode;

    fn unit() -> ScheduledCodec<PolarCode> {
        ScheduledCodec::new(PolarCode::new().unwrap(), ScheduleConfig::default()).unwrap()
    }

    #[test]
    fn test_encode_acknowledged_after_two_steps() {
        let mut unit = unit();
        let expected = unit.code().encode(0xABCDEF);
        unit.submit(Request::Encode(0xABCDEF)).unwrap();

        assert_eq!(unit.tick(), None);
        assert!(unit.is_busy());
        assert_eq!(unit.tick(), Some(Response::Encoded(expected)));
        assert_eq!(unit.ack(), Some(&Response::Encoded(expected)));
        assert!(unit.is_idle());

        // The acknowledgement lasts one step.
        assert_eq!(unit.tick(), None);
        assert_eq!(unit.ack(), None);
    }

    #[test]
    fn test_decode_within_bound() {
        let mut unit = unit();
        let received = unit.code().encode(0x555555) ^ 0b111;
        let (response, steps) = unit.run(Request::Decode(received)).unwrap();
        assert_eq!(
            response,
            Response::Decoded(DecodeResult::Accepted { payload: 0x555555 })
        );
        assert!(steps <= MAX_DECODE_LATENCY);
        assert_eq!(unit.steps(), u64::from(steps));
    }

    #[test]
    fn test_busy_refuses_new_request() {
        let mut unit = unit();
        unit.submit(Request::Decode(0)).unwrap();
        assert_eq!(unit.submit(Request::Encode(1)), Err(Error::Busy));

        let response = loop {
            if let Some(ack) = unit.tick() {
                break ack;
            }
        };
        assert_eq!(
            response,
            Response::Decoded(DecodeResult::Accepted { payload: 0 })
        );
        assert!(unit.submit(Request::Encode(1)).is_ok());
    }

    #[test]
    fn test_back_to_back_requests() {
        let mut unit = unit();
        let (first, steps) = unit.run(Request::Encode(0x000001)).unwrap();
        assert_eq!(steps, DEFAULT_ENCODE_LATENCY);
        let Response::Encoded(block) = first else {
            panic!("expected an encode acknowledgement");
        };

        let (second, _) = unit.run(Request::Decode(block ^ (1 << 63))).unwrap();
        assert_eq!(
            second,
            Response::Decoded(DecodeResult::Accepted { payload: 1 })
        );
    }

    #[test]
    fn test_rejected_decode_is_acknowledged() {
        let mut unit = unit();
        let received = unit.code().encode(0xAAAAAA) ^ 0b1111;
        let (response, _) = unit.run(Request::Decode(received)).unwrap();
        assert_eq!(response, Response::Decoded(DecodeResult::Rejected));
    }

    #[test]
    fn test_idle_ticks_do_nothing() {
        let mut unit = unit();
        for _ in 0..5 {
            assert_eq!(unit.tick(), None);
        }
        assert!(unit.is_idle());
        assert_eq!(unit.steps(), 5);
    }

    #[test]
    fn test_config_validation() {
        let code = PolarCode::new().unwrap();
        let too_slow = ScheduleConfig::new().with_decode_latency(13);
        assert!(matches!(
            ScheduledCodec::new(code.clone(), too_slow),
            Err(Error::InvalidInput(_))
        ));

        let instant = ScheduleConfig::new().with_encode_latency(0);
        assert!(ScheduledCodec::new(code.clone(), instant).is_err());

        let fast = ScheduleConfig::new().with_decode_latency(3);
        let mut unit = ScheduledCodec::new(code, fast).unwrap();
        let (_, steps) = unit.run(Request::Decode(0)).unwrap();
        assert_eq!(steps, 3);
    }
}
