//!  jaccard similarity of node neighbourhoods
//!


use ndarray::{ArrayView1};


#[cfg_attr(doc, katexit::katexit)]
/// The similarity of two nodes is the jaccard overlap of their neighbour sets
/// $$ s(i,j) = \frac{|N_i \cap N_j|}{|N_i \cup N_j|} $$
/// where $N_i$ is the set of columns carrying a positive weight in adjacency row i.
/// An empty union gives 0.
pub fn jaccard_neighbourhood(row_i: &ArrayView1<f64>, row_j: &ArrayView1<f64>) -> f64 {
    assert_eq!(row_i.len(), row_j.len());
    let (common, total) = row_i.iter().zip(row_j.iter()).fold((0usize, 0usize), |acc, w| {
        match (*w.0 > 0., *w.1 > 0.) {
            (true, true)   => (acc.0 + 1, acc.1 + 1),
            (false, false) => acc,
            _              => (acc.0, acc.1 + 1),
        }
    });
    if total > 0 { common as f64 / total as f64 } else { 0. }
} // end of jaccard_neighbourhood


//===============================================================


mod tests {

    #[allow(unused)]
    use super::*;

    #[allow(dead_code)]
    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }


    #[test]
    fn test_jaccard_neighbourhood() {
        //
        log_init_test();
        //
        // N_i = {0, 2, 3} and N_j = {2, 3, 4} overlap on {2, 3}
        let row_i = ndarray::arr1(&[1., 0., 2., 1., 0.]);
        let row_j = ndarray::arr1(&[0., 0., 1., 3., 1.]);
        let check = (jaccard_neighbourhood(&row_i.view(), &row_j.view()) - 0.5).abs();
        log::debug!("check : {}", check);
        assert!(check < 1.0E-10);
        // identical neighbourhoods
        let check = (jaccard_neighbourhood(&row_i.view(), &row_i.view()) - 1.).abs();
        assert!(check < 1.0E-10);
        // disjoint neighbourhoods
        let row_k = ndarray::arr1(&[0., 1., 0., 0., 0.]);
        assert_eq!(jaccard_neighbourhood(&row_i.view(), &row_k.view()), 0.);
        // empty union
        let null_row = ndarray::arr1(&[0., 0., 0., 0., 0.]);
        assert_eq!(jaccard_neighbourhood(&null_row.view(), &null_row.view()), 0.);
    } // end of test_jaccard_neighbourhood


    #[test]
    fn test_jaccard_bounds() {
        //
        log_init_test();
        //
        let rows = [
            ndarray::arr1(&[1., 0., 2., 1., 0.]),
            ndarray::arr1(&[0., 0., 1., 3., 1.]),
            ndarray::arr1(&[0., 1., 0., 0., 0.]),
            ndarray::arr1(&[0., 0., 0., 0., 0.]),
            ndarray::arr1(&[1., 1., 1., 1., 1.]),
        ];
        for row_i in &rows {
            for row_j in &rows {
                let s = jaccard_neighbourhood(&row_i.view(), &row_j.view());
                assert!(s >= 0. && s <= 1.);
            }
        }
    } // end of test_jaccard_bounds

} // end of mod tests
