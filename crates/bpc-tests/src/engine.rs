//! Counting transform engine
//!
//! Links the two chain shapes the estimators build:
//!
//! - `[device, Lab]`: device words in, the profile's scripted darkest
//!   colorant out
//! - `[Lab, device, device, Lab]`: Lab in, Lab out with L* run through the
//!   profile's scripted response for the second stage's intent
//!
//! Every auxiliary profile and transform carries a [`LiveToken`], so a test
//! can check that nothing outlives an estimator call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use oxbpc_core::{
    ChainStage, ColorTransform, EngineError, Lab, LabEncoding, PixelFormat, ProfileClass,
    RenderingIntent, Result, Samples, TransformEngine, TransformFlags,
};

use crate::curves::LightnessCurve;
use crate::synthetic::{ProfileRole, SyntheticProfile};

/// Create/drop bookkeeping shared by an engine and everything it creates
#[derive(Debug, Default)]
pub struct Counters {
    profiles_created: AtomicUsize,
    profiles_live: AtomicUsize,
    profiles_peak: AtomicUsize,
    transforms_created: AtomicUsize,
    transforms_live: AtomicUsize,
    transforms_peak: AtomicUsize,
    evaluations: AtomicUsize,
}

impl Counters {
    pub fn profiles_created(&self) -> usize {
        self.profiles_created.load(Ordering::SeqCst)
    }

    pub fn profiles_live(&self) -> usize {
        self.profiles_live.load(Ordering::SeqCst)
    }

    /// Most auxiliary profiles alive at the same time
    pub fn profiles_peak(&self) -> usize {
        self.profiles_peak.load(Ordering::SeqCst)
    }

    pub fn transforms_created(&self) -> usize {
        self.transforms_created.load(Ordering::SeqCst)
    }

    pub fn transforms_live(&self) -> usize {
        self.transforms_live.load(Ordering::SeqCst)
    }

    /// Most transforms alive at the same time
    pub fn transforms_peak(&self) -> usize {
        self.transforms_peak.load(Ordering::SeqCst)
    }

    /// Calls to [`ColorTransform::transform`]
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }

    /// No auxiliary profile or transform is alive
    pub fn all_released(&self) -> bool {
        self.profiles_live() == 0 && self.transforms_live() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Profile,
    Transform,
}

/// Decrements the live count of its resource when dropped
#[derive(Debug)]
pub struct LiveToken {
    counters: Arc<Counters>,
    resource: Resource,
}

impl LiveToken {
    fn new(counters: &Arc<Counters>, resource: Resource) -> Self {
        let (created, live, peak) = match resource {
            Resource::Profile => (
                &counters.profiles_created,
                &counters.profiles_live,
                &counters.profiles_peak,
            ),
            Resource::Transform => (
                &counters.transforms_created,
                &counters.transforms_live,
                &counters.transforms_peak,
            ),
        };
        created.fetch_add(1, Ordering::SeqCst);
        let now = live.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        Self {
            counters: Arc::clone(counters),
            resource,
        }
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        let live = match self.resource {
            Resource::Profile => &self.counters.profiles_live,
            Resource::Transform => &self.counters.transforms_live,
        };
        live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// One stage of a linked chain, as the engine saw it
#[derive(Debug, Clone, PartialEq)]
pub struct StageRecord {
    pub role: ProfileRole,
    pub class: ProfileClass,
    pub intent: RenderingIntent,
    pub black_point_compensation: bool,
    pub adaptation_state: f64,
}

/// A `create_transform` request
#[derive(Debug, Clone, PartialEq)]
pub struct ChainRecord {
    pub stages: Vec<StageRecord>,
    pub input: PixelFormat,
    pub output: PixelFormat,
    pub flags: TransformFlags,
}

impl ChainRecord {
    /// `[Lab, device, device, Lab]`
    pub fn is_round_trip(&self) -> bool {
        self.stages.len() == 4
    }

    /// Intent the device is entered with
    pub fn device_intent(&self) -> Option<RenderingIntent> {
        self.stages
            .iter()
            .find(|s| s.role == ProfileRole::Device)
            .map(|s| s.intent)
    }
}

enum Response {
    Colorant { lab: Lab, channels: usize },
    RoundTrip(LightnessCurve),
}

/// Transform produced by [`SyntheticEngine`]
pub struct SyntheticTransform {
    response: Response,
    fail: bool,
    counters: Arc<Counters>,
    _token: LiveToken,
}

impl ColorTransform for SyntheticTransform {
    fn transform(&self, src: Samples<'_>, dst: &mut [f64], count: usize) -> Result<()> {
        self.counters.evaluations.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EngineError::Transform("scripted evaluation failure".into()));
        }
        if dst.len() != count * 3 {
            return Err(EngineError::BufferSize {
                expected: count * 3,
                actual: dst.len(),
            });
        }

        match (&self.response, src) {
            (Response::Colorant { lab, channels }, Samples::Words(words)) => {
                if words.len() != count * channels {
                    return Err(EngineError::BufferSize {
                        expected: count * channels,
                        actual: words.len(),
                    });
                }
                for out in dst.chunks_exact_mut(3) {
                    out.copy_from_slice(&lab.to_array());
                }
            }
            (Response::RoundTrip(curve), Samples::Doubles(values)) => {
                if values.len() != count * 3 {
                    return Err(EngineError::BufferSize {
                        expected: count * 3,
                        actual: values.len(),
                    });
                }
                for (out, lab) in dst.chunks_exact_mut(3).zip(values.chunks_exact(3)) {
                    out[0] = curve(lab[0]);
                    out[1] = lab[1];
                    out[2] = lab[2];
                }
            }
            _ => return Err(EngineError::UnsupportedFormat("samples do not match chain".into())),
        }

        Ok(())
    }
}

/// Engine over [`SyntheticProfile`]s
#[derive(Default)]
pub struct SyntheticEngine {
    counters: Arc<Counters>,
    chains: Mutex<Vec<ChainRecord>>,
    fail_lab_profile: Option<LabEncoding>,
    fail_chain_len: Option<usize>,
    fail_evaluation: bool,
    skip_chain_log: bool,
}

impl SyntheticEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to create Lab profiles with `encoding`
    pub fn failing_lab_profile(mut self, encoding: LabEncoding) -> Self {
        self.fail_lab_profile = Some(encoding);
        self
    }

    /// Refuse to link chains of `len` stages
    pub fn failing_chain(mut self, len: usize) -> Self {
        self.fail_chain_len = Some(len);
        self
    }

    /// Link everything, but fail every evaluation
    pub fn failing_evaluation(mut self) -> Self {
        self.fail_evaluation = true;
        self
    }

    /// Stop recording chains, for long benchmark runs
    pub fn without_chain_log(mut self) -> Self {
        self.skip_chain_log = true;
        self
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Every chain requested so far, in order
    pub fn chains(&self) -> Vec<ChainRecord> {
        self.chains.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(
        &self,
        chain: &[ChainStage<'_, SyntheticProfile>],
        input: PixelFormat,
        output: PixelFormat,
        flags: TransformFlags,
    ) {
        if self.skip_chain_log {
            return;
        }
        let record = ChainRecord {
            stages: chain
                .iter()
                .map(|s| StageRecord {
                    role: s.profile.role,
                    class: s.profile.class,
                    intent: s.intent,
                    black_point_compensation: s.black_point_compensation,
                    adaptation_state: s.adaptation_state,
                })
                .collect(),
            input,
            output,
            flags,
        };
        if let Ok(mut chains) = self.chains.lock() {
            chains.push(record);
        }
    }
}

impl TransformEngine for SyntheticEngine {
    type Profile = SyntheticProfile;
    type Transform = SyntheticTransform;

    fn create_lab_profile(&self, encoding: LabEncoding) -> Result<SyntheticProfile> {
        if self.fail_lab_profile == Some(encoding) {
            return Err(EngineError::ProfileCreation(format!("Lab {encoding:?} refused")));
        }
        Ok(SyntheticProfile::lab_pcs(
            encoding,
            LiveToken::new(&self.counters, Resource::Profile),
        ))
    }

    fn create_transform(
        &self,
        chain: &[ChainStage<'_, SyntheticProfile>],
        input: PixelFormat,
        output: PixelFormat,
        flags: TransformFlags,
    ) -> Result<SyntheticTransform> {
        self.record(chain, input, output, flags);

        if self.fail_chain_len == Some(chain.len()) {
            return Err(EngineError::Transform(format!("{}-stage chain refused", chain.len())));
        }

        let response = match (chain, input) {
            ([device, lab], PixelFormat::Device { channels, .. })
                if device.profile.role == ProfileRole::Device
                    && matches!(lab.profile.role, ProfileRole::LabPcs(_)) =>
            {
                Response::Colorant {
                    lab: device.profile.colorant_for(device.intent),
                    channels,
                }
            }
            ([_, device, _, _], PixelFormat::LabDouble)
                if device.profile.role == ProfileRole::Device =>
            {
                Response::RoundTrip(device.profile.round_trip_for(device.intent))
            }
            _ => {
                return Err(EngineError::Transform(format!(
                    "cannot link {} stages from {input:?}",
                    chain.len()
                )));
            }
        };

        Ok(SyntheticTransform {
            response,
            fail: self.fail_evaluation,
            counters: Arc::clone(&self.counters),
            _token: LiveToken::new(&self.counters, Resource::Transform),
        })
    }
}
