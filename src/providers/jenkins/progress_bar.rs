use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress indication for the three-phase report collection.
pub struct PhaseProgress {
    pb: ProgressBar,
    visible: bool,
}

impl PhaseProgress {
    /// Start Phase 1: scanning folders and job listings
    pub fn start_phase_1(instance_count: usize, visible: bool) -> Self {
        let pb = spinner(visible);
        pb.set_message(format!(
            "Phase 1/3: Scanning {instance_count} instances for jobs..."
        ));

        Self { pb, visible }
    }

    /// Finish Phase 1 and start Phase 2, which counts fetched builds
    pub fn finish_phase_1_start_phase_2(self, job_count: usize, build_count: usize) -> Self {
        self.pb
            .finish_with_message(format!("✓ Phase 1/3: Found {job_count} jobs"));

        let pb = ProgressBar::new(build_count as u64);
        pb.set_draw_target(draw_target(self.visible));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap(),
        );
        pb.set_message("Phase 2/3: Fetching build details");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            visible: self.visible,
        }
    }

    /// Bar advanced once per attempted build during Phase 2
    pub fn bar(&self) -> &ProgressBar {
        &self.pb
    }

    /// Finish Phase 2 and start Phase 3
    pub fn finish_phase_2_start_phase_3(self, filled: usize) -> Self {
        self.pb
            .finish_with_message(format!("✓ Phase 2/3: Fetched details for {filled} builds"));

        let pb = spinner(self.visible);
        pb.set_message("Phase 3/3: Rendering report...");

        Self {
            pb,
            visible: self.visible,
        }
    }

    /// Finish Phase 3 and complete all progress
    pub fn finish_phase_3(self) {
        self.pb
            .finish_with_message("✓ Phase 3/3: Report rendered successfully");
    }
}

fn draw_target(visible: bool) -> ProgressDrawTarget {
    if visible {
        ProgressDrawTarget::stderr()
    } else {
        ProgressDrawTarget::hidden()
    }
}

fn spinner(visible: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(draw_target(visible));
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
