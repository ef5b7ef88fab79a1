use bon::Builder;

/// Hyper-parameters of the forecast pipeline.
///
/// The defaults are the production settings: 100 trees of depth at most 10, an 80/20
/// split seeded with 42, at least 100 training observations, and an uncertainty band
/// of half the batch standard deviation.
///
/// # Examples
///
/// ```
/// use weather_likelihood::ForecastConfig;
///
/// let quick = ForecastConfig::builder().n_trees(10).max_depth(4).build();
/// assert_eq!(quick.seed, 42);
/// assert_eq!(ForecastConfig::default().n_trees, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ForecastConfig {
    #[builder(default = 100)]
    pub n_trees: usize,
    #[builder(default = 10)]
    pub max_depth: usize,
    /// Nodes with fewer rows than this become leaves.
    #[builder(default = 2)]
    pub min_samples_split: usize,
    /// Share of observations held out for evaluation.
    #[builder(default = 0.2)]
    pub test_fraction: f64,
    #[builder(default = 42)]
    pub seed: u64,
    #[builder(default = 100)]
    pub min_training_samples: usize,
    /// Multiplier applied to the standard deviation of a forecast batch to get the
    /// half-width of each point's band.
    #[builder(default = 0.5)]
    pub uncertainty_scale: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
