//! Test-category gates for `--app` and `--api` suites
//!
//! Suites that hit a live application or web API are opt-in. libtest rejects
//! options it does not know, so gated suites live in a test target declared
//! with `harness = false` whose `main` hands its tests to a [`Suite`]:
//!
//! ```toml
//! [[test]]
//! name = "live_api"
//! harness = false
//! ```
//!
//! ```rust,no_run
//! use sakusou::harness::{Category, Suite};
//!
//! fn main() {
//!     Suite::parse()
//!         .gated(Category::Api, "users_can_be_listed", || Ok(()))
//!         .test("payload_is_well_formed", || Ok(()))
//!         .run()
//!         .exit();
//! }
//! ```
//!
//! The category is then enabled on that binary's command line, next to the
//! usual runner options, or through the environment for any test target:
//!
//! ```text
//! cargo test --test live_api -- --api --nocapture
//! SAKUSOU_API=1 cargo test
//! ```
//!
//! Inside ordinary `#[test]` functions, [`skip_unless!`](crate::skip_unless)
//! returns early with the same fixed reason.
//!
//! ```rust
//! use sakusou::harness::{Category, HarnessOptions};
//!
//! let options = HarnessOptions::from_args(["tests", "--api", "--nocapture"]);
//! assert!(options.is_enabled(Category::Api));
//! assert_eq!(
//!     options.skip_reason(Category::App).as_deref(),
//!     Some("The option of --app is required to run.")
//! );
//! ```

use clap::{Args, Parser};
use libtest_mimic::{Arguments, Conclusion, Trial};
use std::ffi::OsString;
use std::fmt;
use std::sync::OnceLock;

pub use libtest_mimic::Failed;

/// Values of `SAKUSOU_APP` / `SAKUSOU_API` that enable a category
const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];

/// An opt-in category of tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// End-to-end tests against the application
    App,
    /// Tests against the web API
    Api,
}

impl Category {
    /// Every category
    pub const ALL: [Category; 2] = [Category::App, Category::Api];

    /// Command-line flag enabling the category
    pub fn flag(&self) -> &'static str {
        match self {
            Self::App => "--app",
            Self::Api => "--api",
        }
    }

    /// Environment variable enabling the category
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::App => "SAKUSOU_APP",
            Self::Api => "SAKUSOU_API",
        }
    }

    /// Short name, shown as the test kind in runner output
    pub fn name(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Api => "api",
        }
    }

    /// Help text of the flag
    pub fn help(&self) -> &'static str {
        match self {
            Self::App => "run testing for ATTA application.",
            Self::Api => "run testing for web api.",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Which test categories are enabled for this run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Args)]
pub struct HarnessOptions {
    /// run testing for ATTA application.
    #[arg(long)]
    pub app: bool,

    /// run testing for web api.
    #[arg(long)]
    pub api: bool,
}

/// Full command line of a gated test binary: the category flags plus the
/// test-runner options understood by libtest.
#[derive(Debug, Clone, Parser)]
#[command(name = "sakusou", about = "Test-category gates", args_override_self = true)]
pub struct HarnessArgs {
    /// `--app` / `--api`
    #[command(flatten)]
    pub categories: HarnessOptions,

    /// Filter, `--nocapture`, `--test-threads` and the rest
    #[command(flatten)]
    pub runner: Arguments,
}

impl HarnessOptions {
    /// Parse the category flags out of a full argument list.
    ///
    /// The first item is the program name. The rest is parsed as a test
    /// binary's command line; when it does not parse, no category is enabled.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match HarnessArgs::try_parse_from(args) {
            Ok(parsed) => parsed.categories,
            Err(e) => {
                tracing::debug!(error = %e, "Could not parse test-category flags");
                Self::default()
            }
        }
    }

    /// Read the categories from `SAKUSOU_APP` / `SAKUSOU_API`.
    pub fn from_env() -> Self {
        let enabled = |category: Category| {
            std::env::var(category.env_var())
                .map(|value| TRUTHY.contains(&value.trim().to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        };

        Self {
            app: enabled(Category::App),
            api: enabled(Category::Api),
        }
    }

    /// Flags of the running process combined with the environment.
    pub fn detect() -> Self {
        Self::from_args(std::env::args_os()).merge(Self::from_env())
    }

    /// Options of the running process, detected once and cached.
    pub fn current() -> &'static Self {
        static CURRENT: OnceLock<HarnessOptions> = OnceLock::new();
        CURRENT.get_or_init(|| {
            let options = Self::detect();
            tracing::debug!(app = options.app, api = options.api, "Test categories detected");
            options
        })
    }

    /// A category is enabled when either side enables it.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app: self.app || other.app,
            api: self.api || other.api,
        }
    }

    /// Whether tests of `category` should run
    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::App => self.app,
            Category::Api => self.api,
        }
    }

    /// Reason to skip a test of `category`, `None` when it should run.
    pub fn skip_reason(&self, category: Category) -> Option<String> {
        if self.is_enabled(category) {
            None
        } else {
            Some(format!("The option of {} is required to run.", category.flag()))
        }
    }
}

/// Tests of a `harness = false` target, gated by category.
///
/// Tests of a disabled category are reported as ignored and their skip
/// reason is printed to stderr before the run.
#[derive(Debug)]
pub struct Suite {
    args: HarnessArgs,
    options: HarnessOptions,
    trials: Vec<Trial>,
    skipped: Vec<(String, String)>,
}

impl Suite {
    /// Build a suite from a full argument list, merged with the environment.
    ///
    /// # Errors
    ///
    /// Returns clap's error for an unknown option or a malformed value.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = HarnessArgs::try_parse_from(args)?;
        let options = args.categories.merge(HarnessOptions::from_env());

        Ok(Self {
            args,
            options,
            trials: Vec::new(),
            skipped: Vec::new(),
        })
    }

    /// Build a suite from the process arguments, exiting with usage on error.
    pub fn parse() -> Self {
        match Self::from_args(std::env::args_os()) {
            Ok(suite) => suite,
            Err(e) => e.exit(),
        }
    }

    /// Categories enabled for this run
    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    /// Add a test that always runs.
    pub fn test<F>(mut self, name: impl Into<String>, runner: F) -> Self
    where
        F: FnOnce() -> Result<(), Failed> + Send + 'static,
    {
        self.trials.push(Trial::test(name, runner));
        self
    }

    /// Add a test that runs only when `category` is enabled.
    pub fn gated<F>(mut self, category: Category, name: impl Into<String>, runner: F) -> Self
    where
        F: FnOnce() -> Result<(), Failed> + Send + 'static,
    {
        let name = name.into();
        let trial = match self.options.skip_reason(category) {
            None => Trial::test(name, runner),
            Some(reason) => {
                self.skipped.push((name.clone(), reason.clone()));
                Trial::test(name, move || {
                    eprintln!("skipped: {}", reason);
                    Ok(())
                })
                .with_ignored_flag(true)
            }
        };

        self.trials.push(trial.with_kind(category.name()));
        self
    }

    /// Run the suite with the runner options of the command line.
    pub fn run(self) -> Conclusion {
        if !self.args.runner.list {
            for (name, reason) in &self.skipped {
                tracing::info!(test = %name, reason = %reason, "Skipping test");
                eprintln!("skipped {}: {}", name, reason);
            }
        }

        libtest_mimic::run(&self.args.runner, self.trials)
    }
}

/// Return early from a test unless its category is enabled.
///
/// With one argument the options of the running process are used. The
/// optional last argument is the value returned when skipping, for tests
/// that return a `Result`.
///
/// ```rust
/// use sakusou::harness::{Category, HarnessOptions};
/// use sakusou::skip_unless;
///
/// fn live_api_check(options: &HarnessOptions) -> bool {
///     skip_unless!(options, Category::Api, false);
///     true
/// }
///
/// assert!(!live_api_check(&HarnessOptions::default()));
/// ```
#[macro_export]
macro_rules! skip_unless {
    ($category:expr) => {
        $crate::skip_unless!($crate::harness::HarnessOptions::current(), $category, ())
    };
    ($options:expr, $category:expr) => {
        $crate::skip_unless!($options, $category, ())
    };
    ($options:expr, $category:expr, $skipped:expr) => {
        if let Some(reason) = $options.skip_reason($category) {
            $crate::__tracing::info!(category = %$category, reason = %reason, "Skipping test");
            eprintln!("skipped: {}", reason);
            return $skipped;
        }
    };
}
