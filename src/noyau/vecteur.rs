// src/noyau/vecteur.rs
//
// Vecteurs f64 de longueur fixe (≥ 1), immuables.

use log::debug;

use super::erreur::{sans_nan, ErreurCalcul, Resultat};
use super::format::arrondi_significatif;

#[derive(Clone, Debug, PartialEq)]
pub struct Vecteur(Vec<f64>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpVecteur {
    Norme,
    Unitaire,
    Addition,
    Soustraction,
    ProduitScalaire,
    ProduitVectoriel,
    Angle,
    Projection,
}

/// Résultat d’une opération vectorielle : un vecteur ou un scalaire.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultatVecteur {
    Vecteur(Vecteur),
    Scalaire(f64),
}

impl Vecteur {
    pub fn new(v: Vec<f64>) -> Resultat<Self> {
        if v.is_empty() {
            return Err(ErreurCalcul::dimensions("vecteur vide"));
        }
        Ok(Self(v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn composantes(&self) -> &[f64] {
        &self.0
    }

    fn meme_longueur(&self, b: &Vecteur, op: &str) -> Resultat<()> {
        if self.len() != b.len() {
            return Err(ErreurCalcul::dimensions(format!(
                "{op} : longueurs {} et {}",
                self.len(),
                b.len()
            )));
        }
        Ok(())
    }

    /// Plus grande composante en valeur absolue.
    fn echelle(&self) -> f64 {
        self.0.iter().fold(0.0, |m: f64, x| m.max(x.abs()))
    }

    /// Composantes divisées par `echelle()` : toutes dans [-1, 1].
    fn reduites(&self, s: f64) -> Vec<f64> {
        self.0.iter().map(|x| x / s).collect()
    }

    /// Norme euclidienne, calculée après mise à l’échelle (ni débordement
    /// vers ∞ pour 1e200, ni écrasement vers 0 pour 1e-200).
    pub fn norme(&self) -> f64 {
        let s = self.echelle();
        if s == 0.0 || s.is_infinite() {
            return s;
        }
        s * self.reduites(s).iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    pub fn unitaire(&self) -> Resultat<Vecteur> {
        let n = self.norme();
        if n == 0.0 {
            return Err(ErreurCalcul::VecteurNul("pas de vecteur unitaire".into()));
        }
        Ok(Self(self.0.iter().map(|x| x / n).collect()))
    }

    pub fn addition(&self, b: &Vecteur) -> Resultat<Vecteur> {
        self.meme_longueur(b, "addition")?;
        Ok(Self(self.0.iter().zip(&b.0).map(|(x, y)| x + y).collect()))
    }

    pub fn soustraction(&self, b: &Vecteur) -> Resultat<Vecteur> {
        self.meme_longueur(b, "soustraction")?;
        Ok(Self(self.0.iter().zip(&b.0).map(|(x, y)| x - y).collect()))
    }

    pub fn produit_scalaire(&self, b: &Vecteur) -> Resultat<f64> {
        self.meme_longueur(b, "produit scalaire")?;
        Ok(self.0.iter().zip(&b.0).map(|(x, y)| x * y).sum())
    }

    /// Produit vectoriel (3D seulement).
    pub fn produit_vectoriel(&self, b: &Vecteur) -> Resultat<Vecteur> {
        if self.len() != 3 || b.len() != 3 {
            return Err(ErreurCalcul::dimensions(
                "produit vectoriel : vecteurs 3D seulement",
            ));
        }
        let (a, b) = (&self.0, &b.0);
        Ok(Self(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Angle entre deux vecteurs, en degrés, arrondi à 8 chiffres significatifs.
    ///
    /// cos = a·b / (|a|·|b|), évalué sur les composantes réduites : le facteur
    /// d’échelle se simplifie, et pour b = a le cosinus vaut exactement 1.
    pub fn angle_entre(&self, b: &Vecteur) -> Resultat<f64> {
        self.meme_longueur(b, "angle")?;
        let (sa, sb) = (self.echelle(), b.echelle());
        if sa == 0.0 || sb == 0.0 {
            return Err(ErreurCalcul::VecteurNul("angle indéfini".into()));
        }
        let (ua, ub) = (self.reduites(sa), b.reduites(sb));
        let (ua, ub) = (ua.as_slice(), ub.as_slice());
        let scal = |u: &[f64], v: &[f64]| u.iter().zip(v).map(|(x, y)| x * y).sum::<f64>();

        // clamp : l’erreur flottante peut sortir de [-1, 1]
        let cos = (scal(ua, ub) / (scal(ua, ua) * scal(ub, ub)).sqrt()).clamp(-1.0, 1.0);
        if cos.is_nan() {
            return Err(ErreurCalcul::ResultatInvalide);
        }
        Ok(arrondi_significatif(cos.acos().to_degrees(), 8))
    }

    /// Projection de self sur b : (a·b / b·b) · b
    pub fn projection_sur(&self, b: &Vecteur) -> Resultat<Vecteur> {
        let bb = b.produit_scalaire(b)?;
        let ab = self.produit_scalaire(b)?;
        if bb == 0.0 {
            return Err(ErreurCalcul::VecteurNul("projection sur le vecteur nul".into()));
        }
        let k = ab / bb;
        Ok(Self(b.0.iter().map(|x| x * k).collect()))
    }
}

/// Point d’entrée unique ; B n’est lu que pour les opérations binaires.
pub fn operation_vecteur(
    op: OpVecteur,
    a: &Vecteur,
    b: Option<&Vecteur>,
) -> Resultat<ResultatVecteur> {
    debug!("vecteur {op:?} : |A|={}, |B|={:?}", a.len(), b.map(Vecteur::len));

    let b_requis = || b.ok_or(ErreurCalcul::OperandeManquant("vecteur B"));

    use ResultatVecteur::{Scalaire, Vecteur as V};
    let r = match op {
        OpVecteur::Norme => Scalaire(a.norme()),
        OpVecteur::Unitaire => V(a.unitaire()?),
        OpVecteur::Addition => V(a.addition(b_requis()?)?),
        OpVecteur::Soustraction => V(a.soustraction(b_requis()?)?),
        OpVecteur::ProduitScalaire => Scalaire(a.produit_scalaire(b_requis()?)?),
        OpVecteur::ProduitVectoriel => V(a.produit_vectoriel(b_requis()?)?),
        OpVecteur::Angle => Scalaire(a.angle_entre(b_requis()?)?),
        OpVecteur::Projection => V(a.projection_sur(b_requis()?)?),
    };
    match &r {
        V(v) => sans_nan(v.composantes())?,
        Scalaire(x) => sans_nan([x])?,
    }
    Ok(r)
}
