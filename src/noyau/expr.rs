// src/noyau/expr.rs
//
// AST numérique (f64) + évaluation par parcours d’arbre.
// Ensemble fermé d’opérateurs et de fonctions : aucune autre exécution possible.
//
// IMPORTANT (SAFE):
// - division / reste par 0 exact => DivisionParZero (pas d’infini silencieux)
// - NaN / ±∞ intermédiaires sont laissés passer ; eval.rs les rejette à la fin

use std::fmt;

use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::Fonction;

/// Mode d’angle pour sin/cos/tan. Appartient à l’appelant, lu seulement ici.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    pub fn bascule(self) -> Self {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeAngle::Degres => write!(f, "DEG"),
            ModeAngle::Radians => write!(f, "RAD"),
        }
    }
}

/// 170! ≈ 7.26e306 ; 171! dépasse f64.
pub const FACTORIELLE_MAX: f64 = 170.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Rem(Box<Expr>, Box<Expr>), // %
    Pow(Box<Expr>, Box<Expr>), // ^

    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn evaluer(&self, mode: ModeAngle) -> Resultat<f64> {
        use Expr::*;

        Ok(match self {
            Nombre(v) => *v,
            Neg(x) => -x.evaluer(mode)?,

            Add(a, b) => a.evaluer(mode)? + b.evaluer(mode)?,
            Sub(a, b) => a.evaluer(mode)? - b.evaluer(mode)?,
            Mul(a, b) => a.evaluer(mode)? * b.evaluer(mode)?,

            Div(a, b) => {
                let (x, y) = (a.evaluer(mode)?, b.evaluer(mode)?);
                if y == 0.0 {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                x / y
            }
            Rem(a, b) => {
                let (x, y) = (a.evaluer(mode)?, b.evaluer(mode)?);
                if y == 0.0 {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                x % y
            }
            Pow(a, b) => a.evaluer(mode)?.powf(b.evaluer(mode)?),

            Appel(f, x) => appliquer(*f, x.evaluer(mode)?, mode)?,
        })
    }
}

fn appliquer(f: Fonction, x: f64, mode: ModeAngle) -> Resultat<f64> {
    // seules sin/cos/tan lisent le mode
    let x = if f.est_trig() && mode == ModeAngle::Degres {
        x.to_radians()
    } else {
        x
    };

    Ok(match f {
        Fonction::Sin => x.sin(),
        Fonction::Cos => x.cos(),
        Fonction::Tan => x.tan(),
        Fonction::Sqrt => x.sqrt(),
        Fonction::Log => x.log10(),
        Fonction::Ln => x.ln(),
        Fonction::Exp => x.exp(),
        Fonction::Fact => factorielle(x)?,
    })
}

/// n! avec n = ⌊x⌋ ; refuse n < 0 et n > 170.
pub fn factorielle(x: f64) -> Resultat<f64> {
    if x.is_nan() {
        return Err(ErreurCalcul::ResultatInvalide);
    }
    let n = x.floor();
    if n < 0.0 {
        return Err(ErreurCalcul::FactorielleNegative);
    }
    if n > FACTORIELLE_MAX {
        return Err(ErreurCalcul::FactorielleTropGrande);
    }
    Ok((2..=n as u32).fold(1.0, |acc, k| acc * k as f64))
}

/// Affichage entièrement parenthésé (démarche / debug).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(v) => write!(f, "{v}"),
            Neg(x) => write!(f, "-({x})"),
            Add(a, b) => write!(f, "({a} + {b})"),
            Sub(a, b) => write!(f, "({a} - {b})"),
            Mul(a, b) => write!(f, "({a} * {b})"),
            Div(a, b) => write!(f, "({a} / {b})"),
            Rem(a, b) => write!(f, "({a} % {b})"),
            Pow(a, b) => write!(f, "({a} ^ {b})"),
            Appel(fun, x) => write!(f, "{}({x})", fun.nom()),
        }
    }
}
