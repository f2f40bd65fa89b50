/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */


#[macro_use] extern crate geomx_assert_close;

use geomx::{Matrix, MatrixError};

// [[0,-1],[1,0]]
#[test]
fn quarter_turn_is_rotation() {
    let m = Matrix::from_rows(&[&[0.0, -1.0], &[1.0, 0.0]]);
    assert_eq!(m.determinant().unwrap(), 1.0);
    assert!(m.is_rotation().unwrap());
}

#[test]
fn identity_is_own_inverse() {
    let mut m = Matrix::<f64>::identity(3);
    assert_eq!(m.determinant().unwrap(), 1.0);
    assert_eq!(m.trace(), 3.0);
    assert_eq!(m.invert(), 1.0);
    assert_eq!(m, Matrix::identity(3));
}

#[test]
fn gauss_jordan_diagonal() {
    let mut a = Matrix::from_rows(&[&[2.0, 0.0], &[0.0, 4.0]]);
    let mut b = Matrix::identity(2);
    a.gauss_jordan(&mut b).unwrap();

    let expected = Matrix::from_rows(&[&[0.5, 0.0], &[0.0, 0.25]]);
    assert_close!(abs=1e-15, b, expected.clone());
    assert_close!(abs=1e-15, a, expected);
}

#[test]
fn short_text_is_rejected() {
    match "Matrix(2,2)1,2,3".parse::<Matrix<f64>>() {
        Err(MatrixError::Format { .. }) => {},
        r => panic!("{:?}", r),
    }
}

#[test]
fn factor_singular() {
    let mut m = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]);
    assert_eq!(m.factor().unwrap(), 0.0);
}

#[test]
fn from_flat_square() {
    let m = Matrix::from_flat_square(vec![1, 2, 3, 4]).unwrap();
    assert_eq!(m, Matrix::from_rows(&[&[1, 2], &[3, 4]]));

    match Matrix::from_flat_square(vec![1, 2, 3, 4, 5]) {
        Err(e @ MatrixError::NotPerfectSquare { len: 5 }) => {
            assert!(e.to_string().contains("not a square number"), "{}", e);
        },
        r => panic!("{:?}", r),
    }
}

#[test]
fn text_round_trip() {
    let mut m = Matrix::<f64>::new(3, 2);
    m.set_random(7, (-10.0, 10.0));

    let mut buf = vec![];
    m.write_text(&mut buf, ';').unwrap();
    let mut back = Matrix::<f64>::new(0, 0);
    back.read_text(&buf[..], ';').unwrap();
    assert_eq!(back.row_major_data(), m.row_major_data());
}

#[test]
fn faddeev_agrees_with_jacobi() {
    let m = Matrix::from_rows(&[
        &[4.0, 1.0, 0.5],
        &[1.0, 3.0, 0.2],
        &[0.5, 0.2, 1.0],
    ]);
    let poly = m.faddeev().unwrap();
    let eigen = m.diagonalise().unwrap().sorted().unwrap();
    for lambda in eigen.eigenvalues() {
        assert_close!(abs=1e-10, poly.evaluate(lambda), 0.0);
    }
    assert_close!(abs=1e-10, poly.inverse.unwrap(), m.inverse().unwrap());
}

#[test]
fn repaired_rotation() {
    let mut m = Matrix::from_rows(&[
        &[1.0, 0.1, 0.0],
        &[0.0, 2.0, 0.3],
        &[0.2, 0.0, -0.5],
    ]);
    m.to_rotation().unwrap();
    assert_close!(abs=1e-5, m.determinant().unwrap(), 1.0);
    assert_close!(abs=1e-5, &m.to_transpose() * &m, Matrix::identity(3));
}

#[test]
fn random_full_rank_becomes_rotation() {
    let mut rng = rand::thread_rng();
    let mut checked = 0;
    while checked < 20 {
        let mut m = Matrix::<f64>::new(3, 3);
        m.fill_random_with(&mut rng, (-1.0, 1.0));
        if m.determinant().unwrap().abs() < 1e-3 {
            continue;
        }
        let scales = m.to_rotation().unwrap();
        assert_eq!(scales.len(), 3);
        assert_close!(abs=1e-5, m.determinant().unwrap(), 1.0);
        assert_close!(abs=1e-5, &m.to_transpose() * &m, Matrix::identity(3));
        checked += 1;
    }
}
