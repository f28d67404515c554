use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Inscription {
    Table,
    Id,
    Name,
    Email,
    Message,
    CreatedAt,
}
