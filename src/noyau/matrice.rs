// src/noyau/matrice.rs
//
// Matrices denses f64 (ligne par ligne).
// - Construites une fois, jamais modifiées : chaque opération rend une nouvelle matrice.
// - Invariant : lignes ≥ 1, colonnes ≥ 1, toutes les lignes ont la même longueur.
// - Préconditions de forme vérifiées AVANT tout calcul (DimensionsIncompatibles).

use log::debug;

use super::erreur::{sans_nan, ErreurCalcul, Resultat};

/// Tolérance de pivot (Gauss-Jordan / LU).
const EPS_PIVOT: f64 = 1e-12;

/// Au-delà, le déterminant passe par LU (le développement par cofacteurs est en n!).
const MAX_COFACTEURS: usize = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct Matrice {
    lignes: usize,
    colonnes: usize,
    donnees: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpMatrice {
    Determinant,
    Inverse,
    Transposee,
    Addition,
    Soustraction,
    Produit,
}

impl Matrice {
    /// Construit depuis des lignes ; refuse vide ou lignes de longueurs différentes.
    pub fn new(lignes: Vec<Vec<f64>>) -> Resultat<Self> {
        let n = lignes.len();
        let c = lignes.first().map_or(0, Vec::len);
        if n == 0 || c == 0 {
            return Err(ErreurCalcul::dimensions("matrice vide"));
        }
        if lignes.iter().any(|l| l.len() != c) {
            return Err(ErreurCalcul::dimensions("lignes de longueurs différentes"));
        }
        Ok(Self {
            lignes: n,
            colonnes: c,
            donnees: lignes.into_iter().flatten().collect(),
        })
    }

    pub fn identite(n: usize) -> Resultat<Self> {
        if n == 0 {
            return Err(ErreurCalcul::dimensions("matrice vide"));
        }
        Ok(Self::depuis_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 }))
    }

    fn depuis_fn(lignes: usize, colonnes: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut donnees = Vec::with_capacity(lignes * colonnes);
        for i in 0..lignes {
            for j in 0..colonnes {
                donnees.push(f(i, j));
            }
        }
        Self {
            lignes,
            colonnes,
            donnees,
        }
    }

    pub fn lignes(&self) -> usize {
        self.lignes
    }

    pub fn colonnes(&self) -> usize {
        self.colonnes
    }

    pub fn est_carree(&self) -> bool {
        self.lignes == self.colonnes
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.donnees[i * self.colonnes + j]
    }

    pub fn ligne(&self, i: usize) -> &[f64] {
        &self.donnees[i * self.colonnes..(i + 1) * self.colonnes]
    }

    pub fn en_lignes(&self) -> Vec<Vec<f64>> {
        (0..self.lignes).map(|i| self.ligne(i).to_vec()).collect()
    }

    /* ------------------------ Opérations ------------------------ */

    pub fn transposee(&self) -> Matrice {
        Self::depuis_fn(self.colonnes, self.lignes, |i, j| self.get(j, i))
    }

    fn meme_forme(&self, b: &Matrice, op: &str) -> Resultat<()> {
        if self.lignes != b.lignes || self.colonnes != b.colonnes {
            return Err(ErreurCalcul::dimensions(format!(
                "{op} : {}×{} et {}×{}",
                self.lignes, self.colonnes, b.lignes, b.colonnes
            )));
        }
        Ok(())
    }

    pub fn addition(&self, b: &Matrice) -> Resultat<Matrice> {
        self.meme_forme(b, "addition")?;
        Ok(Self::depuis_fn(self.lignes, self.colonnes, |i, j| {
            self.get(i, j) + b.get(i, j)
        }))
    }

    pub fn soustraction(&self, b: &Matrice) -> Resultat<Matrice> {
        self.meme_forme(b, "soustraction")?;
        Ok(Self::depuis_fn(self.lignes, self.colonnes, |i, j| {
            self.get(i, j) - b.get(i, j)
        }))
    }

    /// A (n×m) × B (m×p) => n×p
    pub fn produit(&self, b: &Matrice) -> Resultat<Matrice> {
        if self.colonnes != b.lignes {
            return Err(ErreurCalcul::dimensions(format!(
                "produit : colonnes(A)={} ≠ lignes(B)={}",
                self.colonnes, b.lignes
            )));
        }
        Ok(Self::depuis_fn(self.lignes, b.colonnes, |i, j| {
            (0..self.colonnes).map(|k| self.get(i, k) * b.get(k, j)).sum()
        }))
    }

    fn exige_carree(&self, op: &str) -> Resultat<()> {
        if !self.est_carree() {
            return Err(ErreurCalcul::dimensions(format!(
                "{op} : matrice carrée requise ({}×{})",
                self.lignes, self.colonnes
            )));
        }
        Ok(())
    }

    /// Déterminant : cofacteurs jusqu’à 8×8, LU au-delà.
    pub fn determinant(&self) -> Resultat<f64> {
        self.exige_carree("déterminant")?;
        if self.lignes <= MAX_COFACTEURS {
            Ok(det_cofacteurs(&self.en_lignes()))
        } else {
            Ok(det_lu(self.en_lignes()))
        }
    }

    /// Développement de Laplace sur la première ligne (définition de référence).
    pub fn determinant_cofacteurs(&self) -> Resultat<f64> {
        self.exige_carree("déterminant")?;
        Ok(det_cofacteurs(&self.en_lignes()))
    }

    /// LU avec pivot partiel : det = (±1) · Π u_ii.
    pub fn determinant_lu(&self) -> Resultat<f64> {
        self.exige_carree("déterminant")?;
        Ok(det_lu(self.en_lignes()))
    }

    /// Gauss-Jordan sur [A | I] avec pivot partiel.
    pub fn inverse(&self) -> Resultat<Matrice> {
        self.exige_carree("inverse")?;
        let n = self.lignes;

        let mut aug: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let mut l = self.ligne(i).to_vec();
                l.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
                l
            })
            .collect();

        for col in 0..n {
            // pivot : plus grand |a| de la colonne, à partir de la ligne courante
            let mut max_ligne = col;
            for k in (col + 1)..n {
                if aug[k][col].abs() > aug[max_ligne][col].abs() {
                    max_ligne = k;
                }
            }
            if aug[max_ligne][col].abs() < EPS_PIVOT {
                return Err(ErreurCalcul::MatriceSinguliere);
            }
            aug.swap(col, max_ligne);

            let pivot = aug[col][col];
            for x in aug[col].iter_mut() {
                *x /= pivot;
            }

            // élimine la colonne partout ailleurs (au-dessus compris)
            let ligne_pivot = aug[col].clone();
            for (r, ligne) in aug.iter_mut().enumerate() {
                if r == col {
                    continue;
                }
                let facteur = ligne[col];
                if facteur == 0.0 {
                    continue;
                }
                for (x, p) in ligne.iter_mut().zip(&ligne_pivot) {
                    *x -= facteur * p;
                }
            }
        }

        Ok(Self::depuis_fn(n, n, |i, j| aug[i][n + j]))
    }
}

/* ------------------------ Déterminants (internes) ------------------------ */

fn mineur(m: &[Vec<f64>], col: usize) -> Vec<Vec<f64>> {
    m[1..]
        .iter()
        .map(|l| {
            l.iter()
                .enumerate()
                .filter(|(j, _)| *j != col)
                .map(|(_, x)| *x)
                .collect()
        })
        .collect()
}

fn det_cofacteurs(m: &[Vec<f64>]) -> f64 {
    match m.len() {
        1 => m[0][0],
        2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
        n => (0..n)
            .map(|col| {
                let signe = if col % 2 == 0 { 1.0 } else { -1.0 };
                signe * m[0][col] * det_cofacteurs(&mineur(m, col))
            })
            .sum(),
    }
}

fn det_lu(mut a: Vec<Vec<f64>>) -> f64 {
    let n = a.len();
    let mut det = 1.0;

    for col in 0..n {
        let mut max_ligne = col;
        for k in (col + 1)..n {
            if a[k][col].abs() > a[max_ligne][col].abs() {
                max_ligne = k;
            }
        }
        if a[max_ligne][col] == 0.0 {
            return 0.0;
        }
        if max_ligne != col {
            a.swap(col, max_ligne);
            det = -det;
        }

        let pivot = a[col][col];
        det *= pivot;

        for r in (col + 1)..n {
            let facteur = a[r][col] / pivot;
            if facteur == 0.0 {
                continue;
            }
            for j in col..n {
                a[r][j] -= facteur * a[col][j];
            }
        }
    }

    det
}

/* ------------------------ Point d’entrée unique ------------------------ */

/// Exécute une opération matricielle ; B n’est lu que pour les opérations binaires.
/// Le déterminant est rendu comme matrice 1×1.
pub fn operation_matrice(op: OpMatrice, a: &Matrice, b: Option<&Matrice>) -> Resultat<Matrice> {
    debug!(
        "matrice {op:?} : A {}×{}, B {:?}",
        a.lignes,
        a.colonnes,
        b.map(|m| (m.lignes, m.colonnes))
    );

    let b_requis = || b.ok_or(ErreurCalcul::OperandeManquant("matrice B"));

    let r = match op {
        OpMatrice::Determinant => Matrice::new(vec![vec![a.determinant()?]])?,
        OpMatrice::Inverse => a.inverse()?,
        OpMatrice::Transposee => a.transposee(),
        OpMatrice::Addition => a.addition(b_requis()?)?,
        OpMatrice::Soustraction => a.soustraction(b_requis()?)?,
        OpMatrice::Produit => a.produit(b_requis()?)?,
    };
    sans_nan(&r.donnees)?;
    Ok(r)
}
