// src/noyau/complexe.rs
//
// Nombres complexes (re, im) en f64.
// Type valeur : num_complex::Complex64 (immuable, Copy).

use log::debug;
use num_complex::Complex64;

use super::erreur::{sans_nan, ErreurCalcul, Resultat};
use super::format::{arrondi_significatif, format_nombre};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpComplexe {
    Conjugue,
    Module,
    Argument,
    Polaire,
    DepuisPolaire,
    Addition,
    Soustraction,
    Produit,
    Quotient,
}

/// Forme polaire : r ≥ 0, θ en radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polaire {
    pub r: f64,
    pub theta: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResultatComplexe {
    Complexe(Complex64),
    Scalaire(f64),
    Polaire(Polaire),
}

pub fn conjugue(z: Complex64) -> Complex64 {
    z.conj()
}

pub fn addition(a: Complex64, b: Complex64) -> Complex64 {
    a + b
}

pub fn soustraction(a: Complex64, b: Complex64) -> Complex64 {
    a - b
}

pub fn produit(a: Complex64, b: Complex64) -> Complex64 {
    Complex64::new(a.re * b.re - a.im * b.im, a.re * b.im + a.im * b.re)
}

/// a / b ; refuse b = 0 + 0i (pas de NaN silencieux).
pub fn quotient(a: Complex64, b: Complex64) -> Resultat<Complex64> {
    let den = b.norm_sqr();
    if den == 0.0 {
        return Err(ErreurCalcul::DivisionParZero);
    }
    Ok(Complex64::new(
        (a.re * b.re + a.im * b.im) / den,
        (a.im * b.re - a.re * b.im) / den,
    ))
}

pub fn module(z: Complex64) -> f64 {
    z.norm()
}

/// Argument en radians, dans ]-π, π].
pub fn argument(z: Complex64) -> f64 {
    z.im.atan2(z.re)
}

/// Radians -> degrés, 10 chiffres significatifs (affichage des angles).
pub fn en_degres(theta: f64) -> f64 {
    arrondi_significatif(theta.to_degrees(), 10)
}

/// Argument en degrés, 10 chiffres significatifs (affichage).
pub fn argument_degres(z: Complex64) -> f64 {
    en_degres(argument(z))
}

pub fn vers_polaire(z: Complex64) -> Polaire {
    Polaire {
        r: module(z),
        theta: argument(z),
    }
}

/// r, θ en DEGRÉS -> (r·cos θ, r·sin θ)
pub fn depuis_polaire(r: f64, theta_deg: f64) -> Complex64 {
    Complex64::from_polar(r, theta_deg.to_radians())
}

/* ------------------------ Affichage ------------------------ */

/// "3 + 4i", "0 - i", "2.5" (partie imaginaire exactement nulle omise).
///
/// Chaque partie est arrondie à 12 chiffres significatifs ; le coefficient 1
/// de i est omis. Une partie imaginaire infime mais non nulle garde son signe :
/// "3 + 0i".
pub fn format_complexe(z: Complex64) -> String {
    let re = arrondi_significatif(z.re, 12);
    let im = arrondi_significatif(z.im, 12);

    let re_txt = format_nombre(re);
    if im == 0.0 {
        return re_txt;
    }

    let signe = if im < 0.0 { '-' } else { '+' };
    let abs = im.abs();
    let im_txt = if abs == 1.0 {
        "i".to_string()
    } else {
        format!("{}i", format_nombre(abs))
    };
    format!("{re_txt} {signe} {im_txt}")
}

/// "r = 5, θ = 53.13010235°"
pub fn format_polaire(p: Polaire) -> String {
    format!(
        "r = {}, θ = {}°",
        format_nombre(p.r),
        format_nombre(en_degres(p.theta))
    )
}

/* ------------------------ Point d’entrée unique ------------------------ */

/// Exécute une opération complexe.
/// Pour `DepuisPolaire`, A est lu comme (r, θ en degrés).
pub fn operation_complexe(
    op: OpComplexe,
    a: Complex64,
    b: Option<Complex64>,
) -> Resultat<ResultatComplexe> {
    debug!("complexe {op:?} : A={a}, B={b:?}");

    let b_requis = || b.ok_or(ErreurCalcul::OperandeManquant("complexe B"));

    use ResultatComplexe as R;
    let r = match op {
        OpComplexe::Conjugue => R::Complexe(conjugue(a)),
        OpComplexe::Module => R::Scalaire(module(a)),
        OpComplexe::Argument => R::Scalaire(argument(a)),
        OpComplexe::Polaire => R::Polaire(vers_polaire(a)),
        OpComplexe::DepuisPolaire => R::Complexe(depuis_polaire(a.re, a.im)),
        OpComplexe::Addition => R::Complexe(addition(a, b_requis()?)),
        OpComplexe::Soustraction => R::Complexe(soustraction(a, b_requis()?)),
        OpComplexe::Produit => R::Complexe(produit(a, b_requis()?)),
        OpComplexe::Quotient => R::Complexe(quotient(a, b_requis()?)?),
    };
    match r {
        R::Complexe(z) => sans_nan([&z.re, &z.im])?,
        R::Scalaire(x) => sans_nan([&x])?,
        R::Polaire(p) => sans_nan([&p.r, &p.theta])?,
    }
    Ok(r)
}
