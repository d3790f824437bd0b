//! Реестр именованных подключений к store'ам.
//!
//! Явный компонент вместо процесс-глобальных мап: все вызывающие получают
//! &Registry. Читатели идут через RwLock; мутации видны атомарно.
//! Update по одному имени сериализуется отдельной per-name блокировкой,
//! чтобы медленное открытие нового store не держало ни карту подключений,
//! ни update'ы по другим именам.
//!
//! "Закрытие" хэндла — это отпускание Arc: читатель, успевший взять
//! подключение до rename/close_all, дочитывает по старому хэндлу, и store
//! реально закрывается (Drop) только когда последний пользователь закончит.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use log::{info, warn};

use crate::error::BrowseError;
use crate::metrics::{
    record_connection_opened, record_connections_closed, record_open_failure, record_open_locked,
};
use crate::store::{SledStore, Store};

/// Именованное подключение: имя существует в реестре тогда и только тогда,
/// когда его store открыт.
pub struct Connection {
    pub name: String,
    pub path: PathBuf,
    pub store: Arc<dyn Store>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct Registry {
    conns: RwLock<HashMap<String, Arc<Connection>>>,
    // per-name сериализация update'ов; update'ы разных имён независимы
    update_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Открыть store по пути и зарегистрировать под именем.
    pub fn add(&self, name: &str, path: &Path) -> Result<Arc<Connection>, BrowseError> {
        if self.conns.read().expect("registry poisoned").contains_key(name) {
            return Err(BrowseError::AlreadyExists(name.to_string()));
        }
        let store = open_store(path)?;
        self.add_store(name, path, store)
    }

    /// Зарегистрировать уже открытый store (не-sled бэкенды, тесты, встраивание).
    pub fn add_store(
        &self,
        name: &str,
        path: &Path,
        store: Arc<dyn Store>,
    ) -> Result<Arc<Connection>, BrowseError> {
        let conn = Arc::new(Connection {
            name: name.to_string(),
            path: path.to_path_buf(),
            store,
        });
        let mut conns = self.conns.write().expect("registry poisoned");
        // Гонка add/add: победил тот, кто успел первым; наш свежий хэндл
        // просто дропается.
        if conns.contains_key(name) {
            return Err(BrowseError::AlreadyExists(name.to_string()));
        }
        conns.insert(name.to_string(), conn.clone());
        info!("connection '{}' opened at {}", name, path.display());
        Ok(conn)
    }

    /// Подключение по имени.
    pub fn get(&self, name: &str) -> Result<Arc<Connection>, BrowseError> {
        self.conns
            .read()
            .expect("registry poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| BrowseError::NotFound(name.to_string()))
    }

    /// Имена всех подключений.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .conns
            .read()
            .expect("registry poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Снапшот имя -> путь. Дальнейшие мутации реестра на него не влияют.
    pub fn paths(&self) -> HashMap<String, PathBuf> {
        self.conns
            .read()
            .expect("registry poisoned")
            .iter()
            .map(|(name, conn)| (name.clone(), conn.path.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.conns.read().expect("registry poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Переименовать и/или перенацелить подключение.
    ///
    /// Пустые new_name/new_path означают "оставить как есть". Новый store
    /// открывается ДО любых изменений карты: неудачное открытие оставляет
    /// старое подключение нетронутым. Старый хэндл отпускается только если
    /// он был действительно заменён.
    pub fn update(
        &self,
        old_name: &str,
        new_name: &str,
        new_path: &str,
    ) -> Result<(), BrowseError> {
        let name_lock = self.update_lock_for(old_name);
        let _guard = name_lock.lock().expect("update lock poisoned");

        let old = self.get(old_name)?;

        let new_name = if new_name.is_empty() { old_name } else { new_name };
        let new_path: PathBuf = if new_path.is_empty() {
            old.path.clone()
        } else {
            PathBuf::from(new_path)
        };

        if new_name != old_name
            && self
                .conns
                .read()
                .expect("registry poisoned")
                .contains_key(new_name)
        {
            return Err(BrowseError::AlreadyExists(new_name.to_string()));
        }

        // Тот же путь — переиспользуем живой хэндл, без reopen.
        let store = if new_path == old.path {
            old.store.clone()
        } else {
            open_store(&new_path)?
        };

        let conn = Arc::new(Connection {
            name: new_name.to_string(),
            path: new_path.clone(),
            store,
        });

        let mut conns = self.conns.write().expect("registry poisoned");
        // Старое имя могло исчезнуть (close_all) между get() и этим моментом.
        if !conns.contains_key(old_name) {
            return Err(BrowseError::NotFound(old_name.to_string()));
        }
        if new_name != old_name && conns.contains_key(new_name) {
            return Err(BrowseError::AlreadyExists(new_name.to_string()));
        }
        conns.remove(old_name);
        conns.insert(new_name.to_string(), conn);
        drop(conns);

        info!(
            "connection '{}' updated -> '{}' at {}",
            old_name,
            new_name,
            new_path.display()
        );
        Ok(())
    }

    /// Закрыть все подключения. Идемпотентно; порядок закрытия не важен.
    /// Вызывается и из Drop, поэтому не паникует на отравленных замках.
    pub fn close_all(&self) {
        let drained: Vec<Arc<Connection>> = {
            let mut conns = self
                .conns
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            conns.drain().map(|(_, c)| c).collect()
        };
        self.update_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        if !drained.is_empty() {
            record_connections_closed(drained.len() as u64);
            info!("closed {} connection(s)", drained.len());
        }
        // Drop хэндлов — здесь, если мы последние держатели.
    }

    fn update_lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .update_locks
            .lock()
            .expect("update lock table poisoned");
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        // Явный close_all() предпочтителен, но на teardown дотягиваем сами.
        self.close_all();
    }
}

/// Открыть sled-store по пути; Locked/OpenFailure учитываются в метриках.
fn open_store(path: &Path) -> Result<Arc<dyn Store>, BrowseError> {
    match SledStore::open_ro(path) {
        Ok(store) => {
            record_connection_opened();
            Ok(Arc::new(store))
        }
        Err(e @ BrowseError::Locked { .. }) => {
            record_open_locked();
            warn!("{}", e);
            Err(e)
        }
        Err(e) => {
            record_open_failure();
            warn!("{}", e);
            Err(e)
        }
    }
}
