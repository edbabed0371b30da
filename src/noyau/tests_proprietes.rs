//! Tests de propriétés (campagne) : invariants des moteurs sur des entrées générées.
//!
//! But : vérifier les lois algébriques, pas seulement des exemples.
//! - RNG déterministe (seed fixe) : même campagne à chaque exécution
//! - tailles bornées (n ≤ 10 pour les matrices)
//! - tolérances explicites, jamais d’égalité flottante implicite

use num_complex::Complex64;

use super::complexe::{produit, quotient};
use super::erreur::ErreurCalcul;
use super::expr::{factorielle, ModeAngle};
use super::eval::evaluer;
use super::format::format_nombre;
use super::lecture::{lire_donnees, lire_vecteur};
use super::matrice::Matrice;
use super::stats::{
    etendue, mediane, mode, moyenne, operation_stat, variance, Mode, OpStat, TypeVariance,
};
use super::vecteur::{operation_vecteur, OpVecteur, Vecteur};

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    /// Entier dans [-k, k], en f64.
    fn entier(&mut self, k: i32) -> f64 {
        let n = (2 * k + 1) as u32;
        (self.next_u32() % n) as i32 as f64 - k as f64
    }
    /// Réel dans [-k, k[ (pas de 1/1024).
    fn reel(&mut self, k: i32) -> f64 {
        self.entier(k * 1024) / 1024.0
    }
    fn taille(&mut self, min: usize, max: usize) -> usize {
        min + (self.next_u32() as usize) % (max - min + 1)
    }
}

fn matrice_aleatoire(rng: &mut Rng, l: usize, c: usize) -> Matrice {
    Matrice::new(
        (0..l)
            .map(|_| (0..c).map(|_| rng.entier(5)).collect())
            .collect(),
    )
    .unwrap()
}

/// Diagonale dominante : inversible et bien conditionnée.
fn matrice_inversible(rng: &mut Rng, n: usize) -> Matrice {
    let lignes = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let x = rng.reel(3);
                    if i == j {
                        x + 4.0 * n as f64
                    } else {
                        x
                    }
                })
                .collect()
        })
        .collect();
    Matrice::new(lignes).unwrap()
}

fn vecteur_aleatoire(rng: &mut Rng, n: usize) -> Vecteur {
    Vecteur::new((0..n).map(|_| rng.reel(10)).collect()).unwrap()
}

fn ecart_max(a: &Matrice, b: &Matrice) -> f64 {
    assert_eq!((a.lignes(), a.colonnes()), (b.lignes(), b.colonnes()));
    let mut e: f64 = 0.0;
    for i in 0..a.lignes() {
        for j in 0..a.colonnes() {
            e = e.max((a.get(i, j) - b.get(i, j)).abs());
        }
    }
    e
}

/* ------------------------ Matrices ------------------------ */

#[test]
fn prop_inverse_involutive() {
    let mut rng = Rng::new(0x1AB5_u64);
    for _ in 0..60 {
        let n = rng.taille(1, 6);
        let a = matrice_inversible(&mut rng, n);
        let inv = a.inverse().unwrap();
        let inv_inv = inv.inverse().unwrap();
        assert!(ecart_max(&inv_inv, &a) <= 1e-9, "n={n} a={a:?}");

        // A · A⁻¹ = I
        let i = a.produit(&inv).unwrap();
        assert!(ecart_max(&i, &Matrice::identite(n).unwrap()) <= 1e-9);
    }
}

#[test]
fn prop_inverse_singuliere() {
    // deux lignes égales
    let a = Matrice::new(vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![1.0, 2.0, 3.0],
    ])
    .unwrap();
    assert_eq!(a.inverse(), Err(ErreurCalcul::MatriceSinguliere));
    assert_eq!(a.determinant().unwrap(), 0.0);
}

#[test]
fn prop_transposee_involutive_exacte() {
    let mut rng = Rng::new(0x7EA5_u64);
    for _ in 0..80 {
        let (l, c) = (rng.taille(1, 7), rng.taille(1, 7));
        let a = matrice_aleatoire(&mut rng, l, c);
        let t = a.transposee();
        assert_eq!((t.lignes(), t.colonnes()), (c, l));
        assert_eq!(t.transposee(), a);
    }
}

#[test]
fn prop_determinant_identite_et_ligne_nulle() {
    let mut rng = Rng::new(0xDE7_u64);
    for n in 1..=10 {
        // n > 8 : passe par LU
        assert_eq!(Matrice::identite(n).unwrap().determinant().unwrap(), 1.0);

        let mut lignes = matrice_aleatoire(&mut rng, n, n).en_lignes();
        let k = rng.taille(0, n - 1);
        lignes[k] = vec![0.0; n];
        let z = Matrice::new(lignes).unwrap();
        assert_eq!(z.determinant().unwrap(), 0.0, "n={n} ligne nulle {k}");
        assert_eq!(z.determinant_lu().unwrap(), 0.0);
    }
}

#[test]
fn prop_determinant_lu_egal_cofacteurs() {
    let mut rng = Rng::new(0x10C0_u64);
    for _ in 0..40 {
        let n = rng.taille(1, 7);
        let a = matrice_aleatoire(&mut rng, n, n);
        let c = a.determinant_cofacteurs().unwrap();
        let l = a.determinant_lu().unwrap();
        assert!(
            (c - l).abs() <= 1e-9 * c.abs().max(1.0),
            "n={n} cofacteurs={c} lu={l}"
        );
    }
}

#[test]
fn prop_formes_verifiees_avant_calcul() {
    let mut rng = Rng::new(0xF0_u64);
    let a = matrice_aleatoire(&mut rng, 2, 3);
    let b = matrice_aleatoire(&mut rng, 2, 3);
    assert!(matches!(a.determinant(), Err(ErreurCalcul::DimensionsIncompatibles(_))));
    assert!(matches!(a.inverse(), Err(ErreurCalcul::DimensionsIncompatibles(_))));
    assert!(matches!(a.produit(&b), Err(ErreurCalcul::DimensionsIncompatibles(_))));
    assert!(a.produit(&b.transposee()).is_ok());
    assert!(a.addition(&b).is_ok());
}

/* ------------------------ Vecteurs ------------------------ */

#[test]
fn prop_produit_scalaire_symetrique() {
    let mut rng = Rng::new(0x5CA1_u64);
    for _ in 0..100 {
        let n = rng.taille(1, 8);
        let a = vecteur_aleatoire(&mut rng, n);
        let b = vecteur_aleatoire(&mut rng, n);
        assert_eq!(a.produit_scalaire(&b), b.produit_scalaire(&a));
    }
}

#[test]
fn prop_produit_vectoriel_orthogonal() {
    let mut rng = Rng::new(0xC055_u64);
    for _ in 0..100 {
        let a = vecteur_aleatoire(&mut rng, 3);
        let b = vecteur_aleatoire(&mut rng, 3);
        let c = a.produit_vectoriel(&b).unwrap();
        let echelle = 1e-12 * (1.0 + a.norme() * a.norme() * b.norme());
        assert!(c.produit_scalaire(&a).unwrap().abs() <= echelle);
        let echelle = 1e-12 * (1.0 + a.norme() * b.norme() * b.norme());
        assert!(c.produit_scalaire(&b).unwrap().abs() <= echelle);
    }
}

#[test]
fn prop_angle_avec_soi_meme_nul() {
    let mut rng = Rng::new(0xA1E_u64);
    for _ in 0..100 {
        let n = rng.taille(1, 8);
        let a = vecteur_aleatoire(&mut rng, n);
        if a.norme() == 0.0 {
            continue;
        }
        assert_eq!(a.angle_entre(&a).unwrap(), 0.0, "a={a:?}");
    }
}

#[test]
fn prop_angle_independant_de_l_echelle() {
    let mut rng = Rng::new(0xE5CA_u64);
    for _ in 0..60 {
        let n = rng.taille(2, 6);
        let a = vecteur_aleatoire(&mut rng, n);
        let b = vecteur_aleatoire(&mut rng, n);
        if a.norme() == 0.0 || b.norme() == 0.0 {
            continue;
        }
        let ref_ = a.angle_entre(&b).unwrap();
        for k in [1e-120, 1e120] {
            let ka = Vecteur::new(a.composantes().iter().map(|x| x * k).collect()).unwrap();
            assert_eq!(ka.angle_entre(&ka).unwrap(), 0.0, "k={k} a={a:?}");
            let d = ka.angle_entre(&b).unwrap();
            assert!((d - ref_).abs() <= 1e-4, "k={k} {d} ≠ {ref_}");
        }
    }
}

/* ------------------------ NaN : jamais une valeur ------------------------ */

#[test]
fn prop_nan_jamais_une_valeur() {
    let d = lire_donnees("1e999 1e999").unwrap();
    assert_eq!(
        operation_stat(OpStat::Etendue, &d, TypeVariance::Echantillon),
        Err(ErreurCalcul::ResultatInvalide)
    );

    let x = lire_vecteur("1e-100 0").unwrap();
    let y = lire_vecteur("0 1e-100").unwrap();
    let r = operation_vecteur(OpVecteur::Angle, &x, Some(&y)).unwrap();
    assert_eq!(format!("{r:?}"), "Scalaire(90.0)");

    assert!(!format_nombre(f64::NAN).contains('∞'));
}

/* ------------------------ Complexes ------------------------ */

#[test]
fn prop_quotient_inverse_produit() {
    let mut rng = Rng::new(0xC0C0_u64);
    for _ in 0..200 {
        let a = Complex64::new(rng.reel(50), rng.reel(50));
        let b = Complex64::new(rng.reel(50), rng.reel(50));
        if b == Complex64::new(0.0, 0.0) {
            continue;
        }
        let r = quotient(produit(a, b), b).unwrap();
        assert!((r - a).norm() <= 1e-9 * (1.0 + a.norm()), "a={a} b={b} r={r}");
    }
}

/* ------------------------ Statistiques ------------------------ */

#[test]
fn prop_stats_1_2_3_4() {
    let d = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(moyenne(&d).unwrap(), 2.5);
    assert_eq!(mediane(&d).unwrap(), 2.5);
    assert!((variance(&d, TypeVariance::Echantillon).unwrap() - 5.0 / 3.0).abs() < 1e-12);
    assert_eq!(variance(&d, TypeVariance::Population).unwrap(), 1.25);
    assert_eq!(etendue(&d).unwrap(), 3.0);
}

#[test]
fn prop_modes() {
    assert_eq!(
        mode(&[1.0, 1.0, 2.0, 2.0, 3.0]).unwrap(),
        Mode::Valeurs(vec![1.0, 2.0])
    );
    assert_eq!(mode(&[1.0, 2.0, 3.0]).unwrap(), Mode::Aucun);
}

#[test]
fn prop_stats_indifferentes_a_l_ordre() {
    let mut rng = Rng::new(0x0D3E_u64);
    for _ in 0..40 {
        let n = rng.taille(2, 12);
        let d: Vec<f64> = (0..n).map(|_| rng.entier(6)).collect();
        let mut r = d.clone();
        r.reverse();
        assert_eq!(mediane(&d), mediane(&r));
        assert_eq!(mode(&d), mode(&r));
        assert_eq!(etendue(&d), etendue(&r));
    }
}

/* ------------------------ Expressions ------------------------ */

#[test]
fn prop_expressions_de_reference() {
    let deg = ModeAngle::Degres;
    assert_eq!(evaluer("2+3*4", deg).unwrap(), 14.0);
    assert_eq!(evaluer("(2+3)!", deg).unwrap(), 120.0);
    assert_eq!(evaluer("5/0", deg), Err(ErreurCalcul::DivisionParZero));
    assert_eq!(evaluer("2^10", deg).unwrap(), 1024.0);
}

#[test]
fn prop_factorielle_bornes() {
    assert_eq!(factorielle(-1.0), Err(ErreurCalcul::FactorielleNegative));
    assert_eq!(factorielle(171.0), Err(ErreurCalcul::FactorielleTropGrande));
    for k in 0..=170 {
        assert!(factorielle(k as f64).unwrap().is_finite(), "{k}!");
    }
}

#[test]
fn prop_mode_angle_sans_etat_global() {
    // même entrée, deux modes : aucun effet de bord d’un appel sur l’autre
    let d = evaluer("cos(180)", ModeAngle::Degres).unwrap();
    let r = evaluer("cos(180)", ModeAngle::Radians).unwrap();
    let d2 = evaluer("cos(180)", ModeAngle::Degres).unwrap();
    assert!((d + 1.0).abs() < 1e-15);
    assert!((r - 180f64.cos()).abs() < 1e-15);
    assert_eq!(d, d2);
}
