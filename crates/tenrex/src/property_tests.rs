//! Property-based tests for the regression engine
//!
//! These exercise the fitting loop over randomized small problems: fitting
//! must terminate with a finite loss trajectory whose last entry agrees with
//! scoring the fitted model, refitting with the same seed must be
//! bit-identical, and the metrics must satisfy their algebraic relations.

#[cfg(test)]
mod tests {
    use crate::{mse, rmse, FitConfig, KruskalRegressor, TuckerRegressor};
    use proptest::collection::vec;
    use proptest::prelude::*;
    use scirs2_core::ndarray_ext::{Array, Array1, IxDyn};

    fn proptest_config() -> ProptestConfig {
        ProptestConfig {
            cases: 16,
            ..ProptestConfig::default()
        }
    }

    // Small labelled batches: (N, d1, d2) samples with bounded entries
    fn batch_strategy() -> impl Strategy<Value = (Array<f64, IxDyn>, Array1<f64>)> {
        ((4usize..=10), (2usize..=3), (2usize..=3))
            .prop_flat_map(|(n, d1, d2)| {
                let total = n * d1 * d2;
                (
                    Just((n, d1, d2)),
                    vec(-3.0f64..3.0, total),
                    vec(-5.0f64..5.0, n),
                )
            })
            .prop_map(|((n, d1, d2), x_data, y_data)| {
                let x = Array::from_shape_vec(IxDyn(&[n, d1, d2]), x_data).unwrap();
                let y = Array1::from_vec(y_data);
                (x, y)
            })
    }

    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn cp_final_loss_agrees_with_score((x, y) in batch_strategy()) {
            let config = FitConfig {
                n_iter_max: 15,
                reg_w: 0.1,
                ..FitConfig::default()
            };
            let mut model = KruskalRegressor::new(1, config);
            model.fit(&x.view(), &y.view()).unwrap();

            let history = model.loss_history().unwrap();
            prop_assert!(!history.is_empty());
            prop_assert!(history.iter().all(|l| l.is_finite()));

            // Scoring the training batch replays the last loss evaluation
            let last = history[history.len() - 1];
            let score = model.score(&x.view(), &y.view()).unwrap();
            prop_assert!((score - last).abs() < 1e-12);
        }
    }

    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tucker_final_loss_agrees_with_score((x, y) in batch_strategy()) {
            let config = FitConfig {
                n_iter_max: 15,
                reg_w: 0.1,
                ..FitConfig::default()
            };
            let mut model = TuckerRegressor::new(vec![1, 1], config);
            model.fit(&x.view(), &y.view()).unwrap();

            let history = model.loss_history().unwrap();
            prop_assert!(!history.is_empty());
            prop_assert!(history.iter().all(|l| l.is_finite()));

            let last = history[history.len() - 1];
            let score = model.score(&x.view(), &y.view()).unwrap();
            prop_assert!((score - last).abs() < 1e-12);
        }
    }

    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn refitting_with_a_seed_is_bit_identical((x, y) in batch_strategy(), seed in 0u64..100) {
            let config = FitConfig {
                n_iter_max: 5,
                init_seed: seed,
                ..FitConfig::default()
            };
            let mut first = KruskalRegressor::new(1, config);
            let mut second = KruskalRegressor::new(1, config);
            first.fit(&x.view(), &y.view()).unwrap();
            second.fit(&x.view(), &y.view()).unwrap();

            prop_assert_eq!(first.weight_tensor().unwrap(), second.weight_tensor().unwrap());
            prop_assert_eq!(first.loss_history().unwrap(), second.loss_history().unwrap());
        }
    }

    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn metric_relations_hold(data in vec((-10.0f64..10.0, -10.0f64..10.0), 1..20)) {
            let y_true = Array1::from_vec(data.iter().map(|(t, _)| *t).collect());
            let y_pred = Array1::from_vec(data.iter().map(|(_, p)| *p).collect());

            let m = mse(&y_true.view(), &y_pred.view()).unwrap();
            let r = rmse(&y_true.view(), &y_pred.view()).unwrap();

            prop_assert!(m >= 0.0);
            prop_assert!((r * r - m).abs() < 1e-10);
            prop_assert_eq!(mse(&y_true.view(), &y_true.view()).unwrap(), 0.0);

            // Symmetric in its arguments
            let m_swapped = mse(&y_pred.view(), &y_true.view()).unwrap();
            prop_assert!((m - m_swapped).abs() < 1e-12);
        }
    }
}
