//! Built-in skeleton generator.
//!
//! Produces the same file set as `django-admin startproject/startapp`
//! (default templates), including the exact registry marker lines the
//! orchestrator patches.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use stratum_core::{
    application::ports::{Filesystem, ScaffoldGenerator},
    domain::paths::{APPS_PY, INIT_PY, MANAGE_PY, SETTINGS_PY, URLS_PY},
    error::StratumResult,
};

const MANAGE_TEMPLATE: &str = r#"#!/usr/bin/env python
"""Django's command-line utility for administrative tasks."""
import os
import sys


def main():
    """Run administrative tasks."""
    os.environ.setdefault('DJANGO_SETTINGS_MODULE', '{{ project_name }}.settings')
    try:
        from django.core.management import execute_from_command_line
    except ImportError as exc:
        raise ImportError(
            "Couldn't import Django. Are you sure it's installed and "
            "available on your PYTHONPATH environment variable? Did you "
            "forget to activate a virtual environment?"
        ) from exc
    execute_from_command_line(sys.argv)


if __name__ == '__main__':
    main()
"#;

const SETTINGS_TEMPLATE: &str = r#""""
Django settings for {{ project_name }} project.
"""

from pathlib import Path

BASE_DIR = Path(__file__).resolve().parent.parent

SECRET_KEY = '{{ secret_key }}'

DEBUG = True

ALLOWED_HOSTS = []

INSTALLED_APPS = [
    'django.contrib.admin',
    'django.contrib.auth',
    'django.contrib.contenttypes',
    'django.contrib.sessions',
    'django.contrib.messages',
    'django.contrib.staticfiles',
]

MIDDLEWARE = [
    'django.middleware.security.SecurityMiddleware',
    'django.contrib.sessions.middleware.SessionMiddleware',
    'django.middleware.common.CommonMiddleware',
    'django.middleware.csrf.CsrfViewMiddleware',
    'django.contrib.auth.middleware.AuthenticationMiddleware',
    'django.contrib.messages.middleware.MessageMiddleware',
    'django.middleware.clickjacking.XFrameOptionsMiddleware',
]

ROOT_URLCONF = '{{ project_name }}.urls'

TEMPLATES = [
    {
        'BACKEND': 'django.template.backends.django.DjangoTemplates',
        'DIRS': [],
        'APP_DIRS': True,
        'OPTIONS': {
            'context_processors': [
                'django.template.context_processors.request',
                'django.contrib.auth.context_processors.auth',
                'django.contrib.messages.context_processors.messages',
            ],
        },
    },
]

WSGI_APPLICATION = '{{ project_name }}.wsgi.application'

DATABASES = {
    'default': {
        'ENGINE': 'django.db.backends.sqlite3',
        'NAME': BASE_DIR / 'db.sqlite3',
    }
}

LANGUAGE_CODE = 'en-us'

TIME_ZONE = 'UTC'

USE_I18N = True

USE_TZ = True

STATIC_URL = 'static/'

DEFAULT_AUTO_FIELD = 'django.db.models.BigAutoField'
"#;

const URLS_TEMPLATE: &str = r#""""
URL configuration for {{ project_name }} project.
"""
from django.contrib import admin
from django.urls import path

urlpatterns = [
    path('admin/', admin.site.urls),
]
"#;

const ASGI_TEMPLATE: &str = r#""""
ASGI config for {{ project_name }} project.
"""

import os

from django.core.asgi import get_asgi_application

os.environ.setdefault('DJANGO_SETTINGS_MODULE', '{{ project_name }}.settings')

application = get_asgi_application()
"#;

const WSGI_TEMPLATE: &str = r#""""
WSGI config for {{ project_name }} project.
"""

import os

from django.core.wsgi import get_wsgi_application

os.environ.setdefault('DJANGO_SETTINGS_MODULE', '{{ project_name }}.settings')

application = get_wsgi_application()
"#;

const APPS_TEMPLATE: &str = r#"from django.apps import AppConfig


class {{ camel_case_app_name }}Config(AppConfig):
    default_auto_field = 'django.db.models.BigAutoField'
    name = '{{ app_name }}'
"#;

const ADMIN_TEMPLATE: &str = "from django.contrib import admin\n\n# Register your models here.\n";
const MODELS_TEMPLATE: &str = "from django.db import models\n\n# Create your models here.\n";
const TESTS_TEMPLATE: &str = "from django.test import TestCase\n\n# Create your tests here.\n";
const VIEWS_TEMPLATE: &str = "from django.shortcuts import render\n\n# Create your views here.\n";

/// [`ScaffoldGenerator`] that writes Django's default skeleton itself.
pub struct BuiltinGenerator {
    filesystem: Arc<dyn Filesystem>,
}

impl BuiltinGenerator {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    fn write_all(&self, dir: &Path, files: &[(&str, String)]) -> StratumResult<()> {
        for (name, content) in files {
            self.filesystem.write_file(&dir.join(name), content)?;
        }
        Ok(())
    }
}

impl ScaffoldGenerator for BuiltinGenerator {
    fn name(&self) -> &'static str {
        "builtin"
    }

    #[instrument(skip(self), fields(target = %target.display()))]
    fn start_project(&self, name: &str, target: &Path) -> StratumResult<()> {
        let secret_key = format!("django-insecure-{}", Uuid::new_v4().simple());
        let render = |template: &str| {
            template
                .replace("{{ project_name }}", name)
                .replace("{{ secret_key }}", &secret_key)
        };

        let package = target.join(name);
        self.filesystem.create_dir_all(&package)?;
        self.write_all(
            &package,
            &[
                (INIT_PY, String::new()),
                (SETTINGS_PY, render(SETTINGS_TEMPLATE)),
                (URLS_PY, render(URLS_TEMPLATE)),
                ("asgi.py", render(ASGI_TEMPLATE)),
                ("wsgi.py", render(WSGI_TEMPLATE)),
            ],
        )?;

        // manage.py is the project's existence marker, so it goes last.
        let manage = target.join(MANAGE_PY);
        self.filesystem
            .write_file(&manage, &render(MANAGE_TEMPLATE))?;
        self.filesystem.set_permissions(&manage, true)?;

        debug!(package = %package.display(), "Project skeleton written");
        Ok(())
    }

    #[instrument(skip(self), fields(target = %target.display()))]
    fn start_app(&self, name: &str, target: &Path) -> StratumResult<()> {
        let render = |template: &str| {
            template
                .replace("{{ app_name }}", name)
                .replace("{{ camel_case_app_name }}", &camel_case(name))
        };

        let migrations = target.join("migrations");
        self.filesystem.create_dir_all(&migrations)?;
        self.filesystem.write_file(&migrations.join(INIT_PY), "")?;

        self.write_all(
            target,
            &[
                (INIT_PY, String::new()),
                ("admin.py", ADMIN_TEMPLATE.to_string()),
                ("models.py", MODELS_TEMPLATE.to_string()),
                ("tests.py", TESTS_TEMPLATE.to_string()),
                ("views.py", VIEWS_TEMPLATE.to_string()),
                // Existence marker last.
                (APPS_PY, render(APPS_TEMPLATE)),
            ],
        )?;

        debug!("App skeleton written");
        Ok(())
    }
}

/// `app_posts` -> `AppPosts`, as Django names the AppConfig class.
fn camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
