// src/noyau/stats.rs
//
// Statistiques descriptives sur un jeu de données non vide.
// Réductions pures ; l’ordre de saisie ne compte pas (sauf pour grouper le mode).

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::erreur::{sans_nan, ErreurCalcul, Resultat};
use super::format::format_nombre;

/// Diviseur de la variance : n-1 (échantillon) ou n (population).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeVariance {
    #[default]
    Echantillon,
    Population,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpStat {
    Somme,
    Effectif,
    Min,
    Max,
    Moyenne,
    Mediane,
    Mode,
    Etendue,
    Variance,
    EcartType,
}

/// Mode : aucune valeur (toutes distinctes) ou les valeurs les plus fréquentes (croissantes).
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Aucun,
    Valeurs(Vec<f64>),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Aucun => write!(f, "aucun mode"),
            Mode::Valeurs(v) => {
                let txt: Vec<String> = v.iter().map(|x| format_nombre(*x)).collect();
                write!(f, "{}", txt.join(", "))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResultatStat {
    Nombre(f64),
    Mode(Mode),
}

/// Toutes les statistiques d’un coup.
#[derive(Clone, Debug, PartialEq)]
pub struct Resume {
    pub effectif: usize,
    pub somme: f64,
    pub moyenne: f64,
    pub mediane: f64,
    pub mode: Mode,
    pub min: f64,
    pub max: f64,
    pub etendue: f64,
    /// None si l’échantillon n’a qu’une valeur.
    pub variance: Option<f64>,
    pub ecart_type: Option<f64>,
}

fn non_vide(x: &[f64]) -> Resultat<()> {
    if x.is_empty() {
        return Err(ErreurCalcul::DonneesVides);
    }
    Ok(())
}

pub fn somme(x: &[f64]) -> Resultat<f64> {
    non_vide(x)?;
    Ok(x.iter().sum())
}

pub fn effectif(x: &[f64]) -> Resultat<usize> {
    non_vide(x)?;
    Ok(x.len())
}

pub fn min(x: &[f64]) -> Resultat<f64> {
    non_vide(x)?;
    Ok(x.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn max(x: &[f64]) -> Resultat<f64> {
    non_vide(x)?;
    Ok(x.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn moyenne(x: &[f64]) -> Resultat<f64> {
    Ok(somme(x)? / x.len() as f64)
}

pub fn mediane(x: &[f64]) -> Resultat<f64> {
    non_vide(x)?;
    let mut tri = x.to_vec();
    tri.sort_by(f64::total_cmp);
    let mid = tri.len() / 2;
    if tri.len() % 2 == 0 {
        Ok((tri[mid - 1] + tri[mid]) / 2.0)
    } else {
        Ok(tri[mid])
    }
}

/// Groupement par égalité numérique exacte (-0 et 0 confondus).
pub fn mode(x: &[f64]) -> Resultat<Mode> {
    non_vide(x)?;

    let mut freq: HashMap<u64, (f64, usize)> = HashMap::new();
    for &v in x {
        let v = v + 0.0; // -0 => 0
        freq.entry(v.to_bits()).or_insert((v, 0)).1 += 1;
    }

    let max_freq = freq.values().map(|(_, n)| *n).max().unwrap_or(0);
    if max_freq <= 1 {
        return Ok(Mode::Aucun);
    }

    let mut modes: Vec<f64> = freq
        .values()
        .filter(|(_, n)| *n == max_freq)
        .map(|(v, _)| *v)
        .collect();
    modes.sort_by(f64::total_cmp);
    Ok(Mode::Valeurs(modes))
}

pub fn etendue(x: &[f64]) -> Resultat<f64> {
    Ok(max(x)? - min(x)?)
}

pub fn variance(x: &[f64], t: TypeVariance) -> Resultat<f64> {
    let m = moyenne(x)?;
    let n = x.len();
    let diviseur = match t {
        TypeVariance::Echantillon if n < 2 => return Err(ErreurCalcul::EchantillonInsuffisant),
        TypeVariance::Echantillon => (n - 1) as f64,
        TypeVariance::Population => n as f64,
    };
    let sq: f64 = x.iter().map(|v| (v - m) * (v - m)).sum();
    Ok(sq / diviseur)
}

pub fn ecart_type(x: &[f64], t: TypeVariance) -> Resultat<f64> {
    Ok(variance(x, t)?.sqrt())
}

pub fn resume(x: &[f64], t: TypeVariance) -> Resultat<Resume> {
    let variance = match variance(x, t) {
        Ok(v) => Some(v),
        Err(ErreurCalcul::EchantillonInsuffisant) => None,
        Err(e) => return Err(e),
    };
    let r = Resume {
        effectif: effectif(x)?,
        somme: somme(x)?,
        moyenne: moyenne(x)?,
        mediane: mediane(x)?,
        mode: mode(x)?,
        min: min(x)?,
        max: max(x)?,
        etendue: etendue(x)?,
        variance,
        ecart_type: variance.map(f64::sqrt),
    };
    sans_nan(
        [&r.somme, &r.moyenne, &r.mediane, &r.min, &r.max, &r.etendue]
            .into_iter()
            .chain(r.variance.as_ref())
            .chain(r.ecart_type.as_ref()),
    )?;
    if let Mode::Valeurs(v) = &r.mode {
        sans_nan(v)?;
    }
    Ok(r)
}

/// Point d’entrée unique.
pub fn operation_stat(op: OpStat, x: &[f64], t: TypeVariance) -> Resultat<ResultatStat> {
    debug!("stats {op:?} ({t:?}) sur {} valeurs", x.len());

    use ResultatStat::Nombre;
    let r = match op {
        OpStat::Somme => Nombre(somme(x)?),
        OpStat::Effectif => Nombre(effectif(x)? as f64),
        OpStat::Min => Nombre(min(x)?),
        OpStat::Max => Nombre(max(x)?),
        OpStat::Moyenne => Nombre(moyenne(x)?),
        OpStat::Mediane => Nombre(mediane(x)?),
        OpStat::Mode => ResultatStat::Mode(mode(x)?),
        OpStat::Etendue => Nombre(etendue(x)?),
        OpStat::Variance => Nombre(variance(x, t)?),
        OpStat::EcartType => Nombre(ecart_type(x, t)?),
    };
    match &r {
        Nombre(v) => sans_nan([v])?,
        ResultatStat::Mode(Mode::Valeurs(v)) => sans_nan(v)?,
        ResultatStat::Mode(Mode::Aucun) => {}
    }
    Ok(r)
}
