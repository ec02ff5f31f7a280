use crate::marketplace::domain::{Company, CompanyId, CompanyRole, WasteLot, WasteLotId};

pub(super) fn companies() -> Vec<Company> {
    [
        (1, "Refinaria Abreu e Lima", CompanyRole::Generator, Some("/logos/rnest.png")),
        (2, "Cimpor Suape", CompanyRole::Consumer, Some("/logos/cimpor.png")),
        (3, "PetroquímicaSuape", CompanyRole::Both, None),
        (4, "Bunge Alimentos", CompanyRole::Both, Some("/logos/bunge.png")),
        (5, "Estaleiro Atlântico Sul", CompanyRole::Generator, None),
        (6, "Termopernambuco", CompanyRole::Both, None),
        (7, "White Martins", CompanyRole::Both, Some("/logos/white-martins.png")),
        (8, "Mossi & Ghisolfi", CompanyRole::Consumer, None),
    ]
    .into_iter()
    .map(|(id, name, role, logo)| Company {
        id: CompanyId(id),
        name: name.to_string(),
        role,
        logo: logo.map(str::to_string),
    })
    .collect()
}

pub(super) fn wastes() -> Vec<WasteLot> {
    vec![
        lot(
            1,
            "Borra Oleosa",
            "Resíduo oleoso da Refinaria com alto poder calorífico, ideal para coprocessamento em fornos de cimento",
            500.0,
            200.0,
            1,
            "Oleosos",
        ),
        lot(
            2,
            "Catalisador FCC Exausto",
            "Catalisador de craqueamento catalítico usado, rico em alumina e sílica",
            50.0,
            1500.0,
            1,
            "Químicos",
        ),
        lot(
            3,
            "Lodo de ETE Industrial",
            "Lodo tratado da estação de tratamento com potencial para compostagem",
            300.0,
            50.0,
            3,
            "Orgânicos",
        ),
        lot(
            4,
            "Resíduos de PET",
            "Aparas e resíduos de PET pós-industrial, ideais para reciclagem",
            200.0,
            800.0,
            3,
            "Plásticos",
        ),
        lot(
            5,
            "Óleo de Soja Usado",
            "Óleo vegetal usado em processos industriais, potencial para biodiesel",
            150.0,
            300.0,
            4,
            "Oleosos",
        ),
        lot(
            6,
            "Sucata Metálica Naval",
            "Chapas e estruturas metálicas de aço carbono do estaleiro",
            1000.0,
            450.0,
            5,
            "Metálicos",
        ),
        lot(
            7,
            "Cinzas de Caldeira",
            "Cinzas volantes da termoelétrica, ricas em sílica e alumina",
            800.0,
            80.0,
            6,
            "Minerais",
        ),
        lot(
            8,
            "CO2 Industrial",
            "Dióxido de carbono capturado de processos industriais",
            400.0,
            250.0,
            7,
            "Gases",
        ),
    ]
}

fn lot(
    id: u32,
    name: &str,
    description: &str,
    quantity: f64,
    price_per_unit: f64,
    company_id: u32,
    category: &str,
) -> WasteLot {
    WasteLot {
        id: WasteLotId(id),
        name: name.to_string(),
        description: description.to_string(),
        quantity,
        unit: "toneladas".to_string(),
        price_per_unit,
        company_id: CompanyId(company_id),
        available: true,
        category: category.to_string(),
    }
}
