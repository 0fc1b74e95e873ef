//! Simulated network latency for the mock backend.

use std::time::Duration;

use tracing::trace;

/// Backend operations that carry a simulated delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Signup,
    Logout,
    CurrentUser,
    AnalyzeResume,
    JobRecommendations,
    ApplyToJob,
}

/// One delay per operation. A zero duration skips the timer entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyProfile {
    pub login: Duration,
    pub signup: Duration,
    pub logout: Duration,
    pub current_user: Duration,
    pub analyze_resume: Duration,
    pub job_recommendations: Duration,
    pub apply_to_job: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::simulated()
    }
}

impl LatencyProfile {
    /// Delays that feel like a slow remote API.
    pub fn simulated() -> Self {
        Self {
            login: Duration::from_millis(800),
            signup: Duration::from_millis(800),
            logout: Duration::from_millis(300),
            current_user: Duration::from_millis(200),
            analyze_resume: Duration::from_millis(2000),
            job_recommendations: Duration::from_millis(1000),
            apply_to_job: Duration::from_millis(1500),
        }
    }

    pub fn instant() -> Self {
        Self::uniform(Duration::ZERO)
    }

    pub fn uniform(delay: Duration) -> Self {
        Self {
            login: delay,
            signup: delay,
            logout: delay,
            current_user: delay,
            analyze_resume: delay,
            job_recommendations: delay,
            apply_to_job: delay,
        }
    }

    /// The simulated profile multiplied by `factor`; non-positive or
    /// non-finite factors give an instant profile.
    pub fn scaled(factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::instant();
        }
        let s = Self::simulated();
        Self {
            login: s.login.mul_f64(factor),
            signup: s.signup.mul_f64(factor),
            logout: s.logout.mul_f64(factor),
            current_user: s.current_user.mul_f64(factor),
            analyze_resume: s.analyze_resume.mul_f64(factor),
            job_recommendations: s.job_recommendations.mul_f64(factor),
            apply_to_job: s.apply_to_job.mul_f64(factor),
        }
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        match op {
            Operation::Login => self.login,
            Operation::Signup => self.signup,
            Operation::Logout => self.logout,
            Operation::CurrentUser => self.current_user,
            Operation::AnalyzeResume => self.analyze_resume,
            Operation::JobRecommendations => self.job_recommendations,
            Operation::ApplyToJob => self.apply_to_job,
        }
    }

    /// Sleep for the operation's delay. Runs to completion once started.
    pub async fn simulate(&self, op: Operation) {
        let delay = self.delay_for(op);
        if delay.is_zero() {
            return;
        }
        trace!(?op, delay_ms = delay.as_millis() as u64, "simulating latency");
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling() {
        let half = LatencyProfile::scaled(0.5);
        assert_eq!(half.login, Duration::from_millis(400));
        assert_eq!(half.analyze_resume, Duration::from_millis(1000));
        assert_eq!(LatencyProfile::scaled(0.0), LatencyProfile::instant());
        assert_eq!(LatencyProfile::scaled(f64::NAN), LatencyProfile::instant());
        assert_eq!(LatencyProfile::scaled(1.0), LatencyProfile::simulated());
    }

    #[tokio::test(start_paused = true)]
    async fn simulate_waits_for_the_configured_delay() {
        let profile = LatencyProfile::simulated();
        let start = tokio::time::Instant::now();
        profile.simulate(Operation::ApplyToJob).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1500), "woke too early: {elapsed:?}");
        assert!(elapsed < Duration::from_millis(1600), "woke too late: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn instant_profile_does_not_advance_the_clock() {
        let start = tokio::time::Instant::now();
        LatencyProfile::instant().simulate(Operation::AnalyzeResume).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
